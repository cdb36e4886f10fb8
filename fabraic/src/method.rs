//! HTTP method types.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods accepted by [`FabraicClient::request`](crate::FabraicClient::request).
///
/// [`ServiceClient`](crate::ServiceClient) has a helper for each of the five
/// verbs the API uses. `Head` and `Options` can only be sent through the
/// generic `request` entry point.
///
/// ## Examples
///
/// ```rust
/// use fabraic::RestMethod;
///
/// let parsed: RestMethod = "PATCH".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Patch);
/// assert_eq!(RestMethod::Delete.to_string(), "DELETE");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    #[default]
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// HTTP OPTIONS - Query supported methods.
    Options,
}

impl RestMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Patch.to_string(), "PATCH");
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<RestMethod>().unwrap(), RestMethod::Get);
        assert_eq!("post".parse::<RestMethod>().unwrap(), RestMethod::Post);
        assert_eq!("Put".parse::<RestMethod>().unwrap(), RestMethod::Put);
        assert!("FETCH".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_default_is_get() {
        assert_eq!(RestMethod::default(), RestMethod::Get);
    }

    #[test]
    fn test_to_reqwest_matches_display() {
        for method in RestMethod::iter() {
            assert_eq!(method.to_reqwest().as_str(), method.to_string());
        }
    }
}
