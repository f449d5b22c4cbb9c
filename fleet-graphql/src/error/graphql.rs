use std::{any::Any, sync::Arc};

use async_graphql::{ErrorExtensionValues, ErrorExtensions, Name};
use error_info::ErrorInfo;
use indexmap::IndexMap;
use tracing_error::SpanTrace;

use super::{Error, GenericErrorCode};

/// GraphQL Result that represents either success ([`Ok`]) or failure ([`Err`])
pub type GraphQLResult<T, E = Box<GraphQLError>> = std::result::Result<T, E>;

/// Extension keys set by this crate, properties can't override them
const RESERVED_EXTENSIONS: [&str; 5] = ["statusCode", "statusKind", "errorCode", "rawMessage", "messageFields"];

/// GraphQL error
#[derive(Clone)]
pub enum GraphQLError {
    /// An error raised by [async_graphql] itself, like a missing context data
    Async(async_graphql::Error, SpanTrace),
    /// An error raised by the fleet layers
    Custom(Box<Error>),
}

impl GraphQLError {
    /// Creates a new [GraphQLError] from an error code
    pub fn new(code: impl ErrorInfo + Send + Sync + 'static) -> Box<Self> {
        Box::new(Self::Custom(Error::from((code,)).boxed()))
    }

    /// Creates a new internal server error
    pub fn internal(reason: impl Into<String>) -> Box<Self> {
        Box::new(Self::Custom(Error::internal(reason).boxed()))
    }

    /// Creates a new [GraphQLError]
    pub fn from_err(error: Box<Error>) -> Box<Self> {
        Box::new(Self::Custom(error))
    }

    /// Checks wether this error is unexpected or not
    fn is_unexpected(&self) -> bool {
        match self {
            // errors from the graphql lib are unexpected
            GraphQLError::Async(_, _) => true,
            GraphQLError::Custom(err) => err.unexpected,
        }
    }

    /// Returns the string representation of the error
    pub fn to_string(&self, include_context: bool) -> String {
        match self {
            GraphQLError::Async(err, context) => {
                let code = GenericErrorCode::InternalServerError;
                let status = code.status();
                let base = format!(
                    "[{} {}] {}: {}",
                    status.as_str(),
                    status.canonical_reason().unwrap_or("Unknown"),
                    code.code(),
                    &err.message
                );
                if include_context {
                    format!("{base}\n{context}")
                } else {
                    base
                }
            }
            GraphQLError::Custom(err) => {
                if include_context {
                    format!("{err:#}")
                } else {
                    format!("{err}")
                }
            }
        }
    }
}

impl From<async_graphql::Error> for Box<GraphQLError> {
    fn from(err: async_graphql::Error) -> Self {
        Box::new(GraphQLError::Async(err, SpanTrace::capture()))
    }
}
impl From<Box<Error>> for Box<GraphQLError> {
    fn from(err: Box<Error>) -> Self {
        GraphQLError::from_err(err)
    }
}

impl From<Box<GraphQLError>> for async_graphql::Error {
    fn from(value: Box<GraphQLError>) -> Self {
        let e = *value;

        // Errors already converted carry the status extension, they've been traced already
        let new_error = match &e {
            GraphQLError::Async(err, _) => err
                .extensions
                .as_ref()
                .map(|e| e.get("statusCode").is_none())
                .unwrap_or(true),
            GraphQLError::Custom(_) => true,
        };
        if new_error {
            if e.is_unexpected() {
                tracing::error!("{}", e.to_string(true))
            } else if tracing::event_enabled!(tracing::Level::DEBUG) {
                tracing::warn!("{}", e.to_string(true))
            } else {
                tracing::warn!("{}", e.to_string(false))
            }
        }

        match e {
            GraphQLError::Async(mut err, _) => {
                if !new_error {
                    return err;
                }
                // Hide the message and provide generic internal error info
                let code = GenericErrorCode::InternalServerError;
                err.source = Some(Arc::new(err.message));
                err.message = code.raw_message().into();
                err.extend_with(|_, ext| set_code_extensions(ext, &code))
            }
            GraphQLError::Custom(err) => {
                let err = *err;
                let source = err.source.map(|s| {
                    let source: Arc<dyn Any + Send + Sync> = Arc::new(s);
                    source
                });
                let info = err.info;
                let properties = err.properties;
                async_graphql::Error {
                    message: info.message(),
                    source,
                    extensions: None,
                }
                .extend_with(|_, ext| {
                    for (key, value) in properties.into_iter().flatten() {
                        if RESERVED_EXTENSIONS.contains(&key.as_str()) {
                            tracing::error!("Error '{}' contains a reserved property: {key}", info.code());
                            continue;
                        }
                        match async_graphql::Value::try_from(value) {
                            Ok(value) => ext.set(key, value),
                            Err(err) => tracing::error!("Couldn't convert error property '{key}': {err}"),
                        }
                    }
                    set_code_extensions(ext, info.as_ref());
                })
            }
        }
    }
}

/// Appends the status and code extensions of the given [ErrorInfo]
fn set_code_extensions(ext: &mut ErrorExtensionValues, code: &dyn ErrorInfo) {
    let status = code.status();
    ext.set("statusCode", status.as_u16());
    if let Some(reason) = status.canonical_reason() {
        ext.set("statusKind", reason);
    }
    ext.set("errorCode", code.code());
    ext.set("rawMessage", code.raw_message());
    let fields = code.fields();
    if !fields.is_empty() {
        let fields = IndexMap::<Name, async_graphql::Value>::from_iter(
            fields.into_iter().map(|(k, v)| (Name::new(k), async_graphql::Value::from(v))),
        );
        ext.set("messageFields", fields);
    }
}
