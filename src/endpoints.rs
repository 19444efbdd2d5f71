//! URL builders for the three upstream document families
//!
//! All URLs are rooted at the configured base so tests can point the crawler
//! at a mock server.

use crate::config::EndpointConfig;
use url::Url;

/// Per-session bills-list endpoint
pub fn bills_list_url(
    endpoints: &EndpointConfig,
    parliament: u32,
    session: u32,
) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/legisinfo/en/bills/xml?parlsession={}-{}",
        base(endpoints),
        parliament,
        session
    ))
}

/// Per-bill summary/data endpoint
pub fn bill_data_url(
    endpoints: &EndpointConfig,
    parliament: u32,
    session: u32,
    bill_number: &str,
) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/LegisInfo/en/bill/{}-{}/{}/xml",
        base(endpoints),
        parliament,
        session,
        bill_number
    ))
}

/// Per-bill, per-version, per-type document endpoint
///
/// Note the parliament and session are concatenated without a separator in
/// this family, matching the upstream content layout.
pub fn bill_document_url(
    endpoints: &EndpointConfig,
    parliament: u32,
    session: u32,
    document_type: &str,
    bill_number: &str,
    version_index: u32,
) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/Content/Bills/{}{}/{}/{}/{}_{}/{}_E.xml",
        base(endpoints),
        parliament,
        session,
        document_type,
        bill_number,
        bill_number,
        version_index,
        bill_number
    ))
}

fn base(endpoints: &EndpointConfig) -> &str {
    endpoints.base_url.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> EndpointConfig {
        EndpointConfig {
            base_url: "https://www.parl.ca".to_string(),
        }
    }

    #[test]
    fn test_bills_list_url() {
        let url = bills_list_url(&endpoints(), 44, 1).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.parl.ca/legisinfo/en/bills/xml?parlsession=44-1"
        );
    }

    #[test]
    fn test_bill_data_url() {
        let url = bill_data_url(&endpoints(), 44, 1, "C-2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.parl.ca/LegisInfo/en/bill/44-1/C-2/xml"
        );
    }

    #[test]
    fn test_bill_document_url_concatenates_parliament_session() {
        let url = bill_document_url(&endpoints(), 44, 1, "Government", "C-2", 3).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.parl.ca/Content/Bills/441/Government/C-2/C-2_3/C-2_E.xml"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_tolerated() {
        let endpoints = EndpointConfig {
            base_url: "https://www.parl.ca/".to_string(),
        };
        let url = bills_list_url(&endpoints, 35, 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.parl.ca/legisinfo/en/bills/xml?parlsession=35-2"
        );
    }
}
