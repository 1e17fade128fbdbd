use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::walker::PageContext;

/// Field extraction function: runs once per page with the page context and
/// produces the value stored under the field's name. Errors abort the run.
pub type ExtractFn = Box<dyn Fn(&PageContext<'_>) -> anyhow::Result<Value> + Send + Sync>;

/// Next-address decision: `Some(address)` continues the walk at that
/// address, `None` (or an empty string) terminates it.
pub type NextFn = Box<dyn Fn(&PageContext<'_>) -> Option<String> + Send + Sync>;

/// Per-element transform applied to each ledger entry, produced once per
/// walk by a [`MapFactory`].
pub type MapFn = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Map factory: invoked once with the final page's context, yields the
/// element transform.
pub type MapFactory = Box<dyn Fn(&PageContext<'_>) -> MapFn + Send + Sync>;

/// Left-fold step: `(accumulator, element, index) -> accumulator`. The
/// accumulator is `None` on the first call; the fold seeds its own base
/// case from the first element.
pub type FoldFn = Box<dyn Fn(Option<Value>, &Value, usize) -> Value + Send + Sync>;

/// Fold factory: invoked once with the final page's context, yields the
/// fold step.
pub type FoldFactory = Box<dyn Fn(&PageContext<'_>) -> FoldFn + Send + Sync>;

/// One entry in the extractors list: either a value stored verbatim in
/// every page result, or a function invoked with the page context.
pub enum Extractor {
    /// Stored as-is under the field name on every page.
    Static(Value),

    /// Invoked once per page; sees fields extracted earlier in the same
    /// pass through [`PageContext::current`].
    Dynamic(ExtractFn),
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Extractor::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Pagination policy: the next-address decision plus optional map/reduce
/// aggregation factories applied once the walk terminates.
pub struct Paginator {
    /// Decides whether (and where) the walk continues.
    pub next: NextFn,

    /// Optional element transform factory; when present, every ledger
    /// entry is mapped, in order, before any reduce runs.
    pub map: Option<MapFactory>,

    /// Optional fold factory; when present, the mapped sequence (or the
    /// raw ledger if no map was supplied) is folded left-to-right into a
    /// single value.
    pub reduce: Option<FoldFactory>,
}

impl Paginator {
    /// Creates a paginator that only follows addresses, with no
    /// aggregation: the output is the raw sequence of page results.
    pub fn new<F>(next: F) -> Self
    where
        F: Fn(&PageContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            next: Box::new(next),
            map: None,
            reduce: None,
        }
    }

    /// Sets the map factory.
    pub fn map<F>(mut self, factory: F) -> Self
    where
        F: Fn(&PageContext<'_>) -> MapFn + Send + Sync + 'static,
    {
        self.map = Some(Box::new(factory));
        self
    }

    /// Sets the reduce factory.
    pub fn reduce<F>(mut self, factory: F) -> Self
    where
        F: Fn(&PageContext<'_>) -> FoldFn + Send + Sync + 'static,
    {
        self.reduce = Some(Box::new(factory));
        self
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("map", &self.map.is_some())
            .field("reduce", &self.reduce.is_some())
            .finish()
    }
}

/// Transport options consumed when building the default HTTP client.
///
/// Opaque to the walk loop itself; ignored entirely when a caller-supplied
/// client is set on the config.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// User-Agent header value; defaults to `pagewalk/<version>`.
    pub user_agent: Option<String>,

    /// Total per-request timeout.
    pub timeout: Option<Duration>,

    /// Connection establishment timeout.
    pub connect_timeout: Option<Duration>,
}

/// Caller-supplied description of one walk: where to start, what to pull
/// out of each page, and how (whether) to continue past the first page.
pub struct WalkConfig {
    /// Address of the first page to fetch. Required, non-empty.
    pub address: String,

    /// Ordered field extractors. Declaration order is extraction order,
    /// and later extractors can read fields produced by earlier ones.
    pub extractors: Vec<(String, Extractor)>,

    /// Pagination policy. When absent the walk is single-page and returns
    /// that page's cleaned result directly.
    pub paginator: Option<Paginator>,

    /// Options for the default HTTP client.
    pub transport: TransportOptions,

    /// Pre-built HTTP client to use instead of constructing one from
    /// `transport`.
    pub client: Option<reqwest::Client>,
}

impl WalkConfig {
    /// Creates a config that fetches `address` and extracts nothing.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            extractors: Vec::new(),
            paginator: None,
            transport: TransportOptions::default(),
            client: None,
        }
    }

    /// Appends a static field, stored verbatim in every page result.
    pub fn constant(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extractors
            .push((field.into(), Extractor::Static(value.into())));
        self
    }

    /// Appends an extraction function for `field`.
    pub fn extract<F>(mut self, field: impl Into<String>, extractor: F) -> Self
    where
        F: Fn(&PageContext<'_>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.extractors
            .push((field.into(), Extractor::Dynamic(Box::new(extractor))));
        self
    }

    /// Sets the pagination policy.
    pub fn paginate(mut self, paginator: Paginator) -> Self {
        self.paginator = Some(paginator);
        self
    }

    /// Sets the transport options used when building the default client.
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Uses `client` for all fetches instead of building one.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }
}

impl fmt::Debug for WalkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.extractors.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("WalkConfig")
            .field("address", &self.address)
            .field("extractors", &fields)
            .field("paginator", &self.paginator)
            .field("transport", &self.transport)
            .field("client", &self.client.is_some())
            .finish()
    }
}
