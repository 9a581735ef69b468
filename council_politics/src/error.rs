use snafu::Snafu;

/// Errors raised by the election calculations and the data-access gateway.
///
/// All of them describe bad input from the caller: nothing is retried and nothing
/// is silently recovered.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PoliticsError {
    #[snafu(display("Invalid argument {name}: {message}"))]
    InvalidArgument { name: String, message: String },

    #[snafu(display("Invalid operation: {message}"))]
    InvalidOperation { message: String },

    #[snafu(display("No {entity} found with id {id}"))]
    NotFound { entity: String, id: u32 },

    #[snafu(display("Could not build a link from {input}"))]
    InvalidUrl {
        source: url::ParseError,
        input: String,
    },

    #[snafu(display("Error accessing snapshot {path}"))]
    SnapshotIo {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Malformed snapshot {path}"))]
    SnapshotFormat {
        source: serde_json::Error,
        path: String,
    },
}

pub type PoliticsResult<T> = Result<T, PoliticsError>;

pub(crate) fn invalid_argument<T>(name: &str, message: impl Into<String>) -> PoliticsResult<T> {
    InvalidArgumentSnafu {
        name,
        message: message.into(),
    }
    .fail()
}

pub(crate) fn not_found<T>(entity: &str, id: u32) -> PoliticsResult<T> {
    NotFoundSnafu { entity, id }.fail()
}
