//! The terminal operation: show a farewell and end the session.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::outcome::{Payload, Success};
use crate::provider::DisplayProvider;

/// How many `zombis<N>` farewell artifacts exist.
pub const FAREWELL_ARTIFACTS: u32 = 3;

/// Built-in farewell used when no artifact can be shown.
pub const FAREWELL_BANNER: &str = r"
   ,--.      ,--.      ,--.
  ( xx )    ( xx )    ( xx )
   )  (      )  (      )  (
  /|  |\    /|  |\    /|  |\
  Los zombis se llevan la tabla. ¡Adiós!
";

/// Shows a randomly chosen farewell artifact, falling back to the banner.
///
/// The caller discards the table and marks the session ended.
pub fn farewell(rng: &mut ChaCha8Rng, display: &dyn DisplayProvider) -> Success {
    let artifact = format!("zombis{}", rng.gen_range(1..=FAREWELL_ARTIFACTS));
    if let Err(err) = display.show(&artifact) {
        warn!(%artifact, error = %err, "farewell artifact unavailable, using banner");
        display.print(FAREWELL_BANNER);
    }
    info!("session terminated");
    Success::with_payload("session ended", Payload::Terminated)
}
