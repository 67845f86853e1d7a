use thiserror::Error;

#[derive(Debug, Error)]
/// Why a lookup stage produced no reference text.
///
/// Stages collapse these to an empty string before the resolver sees them; the variant is
/// kept only for logging.
pub enum LookupError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Sending the request or decoding its body failed.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Endpoint URL.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Endpoint URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The service answered 200 with an API error envelope.
    #[error("{service} API error '{code}': {info}")]
    Service {
        /// Which service reported the error.
        service: &'static str,
        /// Machine-readable error code.
        code: String,
        /// Human-readable description.
        info: String,
    },

    /// The question matches none of the structured question shapes.
    #[error("question does not match a known fact shape")]
    UnsupportedQuestion,

    /// Entity search returned nothing.
    #[error("no entity found for '{query}'")]
    EntityNotFound {
        /// Search text.
        query: String,
    },

    /// The entity has no usable value for the requested property.
    #[error("entity {entity} has no value for {property}")]
    MissingAttribute {
        /// Entity id.
        entity: String,
        /// Property id.
        property: String,
    },

    /// The attribute's target entity has no label.
    #[error("entity {entity} has no label")]
    MissingLabel {
        /// Entity id.
        entity: String,
    },

    /// Encyclopedia search returned no titles.
    #[error("no search results for '{query}'")]
    NoSearchResults {
        /// Search text.
        query: String,
    },

    /// The best title is too dissimilar from the question to trust.
    #[error("best title '{title}' only matched with ratio {ratio:.2}")]
    WeakTitleMatch {
        /// Closest title.
        title: String,
        /// Its similarity ratio.
        ratio: f64,
    },

    /// The page does not exist (or the title is invalid).
    #[error("page '{title}' does not exist")]
    PageNotFound {
        /// Requested title.
        title: String,
    },

    /// The title names a disambiguation page.
    #[error("page '{title}' is a disambiguation page")]
    Disambiguation {
        /// Requested title.
        title: String,
    },

    /// The page exists but has no extract text.
    #[error("page '{title}' has no summary text")]
    EmptySummary {
        /// Requested title.
        title: String,
    },
}

pub type LookupResult<T> = Result<T, LookupError>;
