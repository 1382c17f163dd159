use crate::err;
use crate::result::GeometryResult;
use tracing::Level;

pub fn init_logging() -> GeometryResult<()> {
    tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|error| err!("Failed to initialize logging: {}", error))?;
    Ok(())
}
