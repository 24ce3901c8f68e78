//! yomigana crate example
//!
//! Runs the reading service against the analyzer binaries configured under
//! the default support directory and prints bracketed furigana for a few
//! sample sentences.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example example_reading
//! ```

use tracing_subscriber::EnvFilter;

use yomigana::config::YomiganaConfig;
use yomigana::service::ReadingService;

/// Application common result type
type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> AppResult<()> {
  let config = YomiganaConfig::default();

  // RUST_LOG takes precedence; the config's [logging] level is the fallback
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level().as_str())),
    )
    .init();

  let mut service = ReadingService::init(&config)?;

  if let Err(e) = service.start() {
    eprintln!("analyzer binaries not available under the support directory: {e}");
    return Ok(());
  }

  let samples = [
    "カリン、自分でまいた種は自分で刈り取れ",
    "昨日、林檎を2個買った。",
    "真莉、大好きだよん＾＾",
    "彼２０００万も使った。",
    "彼二千三百六十円も使った。",
    "千葉",
  ];

  for text in samples {
    match service.reading(text)? {
      Some(reading) => println!("{text}\n  -> {reading}"),
      None => println!("{text}\n  -> (no reading)"),
    }
  }

  service.shutdown();
  Ok(())
}
