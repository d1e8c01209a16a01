use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::transport::{HttpTransport, Transport};

/// Entry point to the API: one method per supported endpoint, each returning
/// normalized records.
///
/// ```no_run
/// use cmc_market::{Config, Market, SortBy, SortDirection};
///
/// # async fn run() -> cmc_market::Result<()> {
/// let config = Config { api_key: Some("YOUR_KEY".into()), ..Config::default() };
/// let market = Market::from_config(&config)?;
/// let top = market
///     .list_latest_tokens(SortBy::MarketCap, SortDirection::Desc, 1, 10, &["USD"])
///     .await?;
/// println!("{} is #1", top[0].name);
/// # Ok(())
/// # }
/// ```
pub struct Market<T: Transport = HttpTransport> {
    pub(crate) transport: T,
    pub(crate) clock: Box<dyn Clock>,
}

impl Market<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpTransport::from_config(config)?))
    }
}

impl<T: Transport> Market<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp records that arrive without a timestamp.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
