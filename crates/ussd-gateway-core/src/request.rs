//! Aggregator callback requests.
//!
//! The aggregator POSTs one form-encoded body per step of a session. It tracks session
//! continuity itself by resending the growing `text`, so a request carries everything
//! the gateway needs and nothing is kept between callbacks.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::RequestError;

/// Wire names of the callback form fields.
pub mod fields {
    /// Aggregator session identifier.
    pub const SESSION_ID: &str = "sessionId";
    /// The USSD code dialled, e.g. `*384*123#`.
    pub const SERVICE_CODE: &str = "serviceCode";
    /// Caller's phone number.
    pub const PHONE_NUMBER: &str = "phoneNumber";
    /// Cumulative `*`-delimited menu input. Absent at session start.
    pub const TEXT: &str = "text";
    /// Mobile network code.
    pub const NETWORK_CODE: &str = "networkCode";
}

/// One normalized callback from the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UssdRequest {
    /// Aggregator session identifier.
    pub session_id: String,
    /// The USSD code dialled.
    pub service_code: String,
    /// Caller's phone number as sent by the aggregator.
    pub phone_number: String,
    /// Cumulative menu input; empty at session start.
    pub text: String,
    /// Mobile network code.
    pub network_code: String,
}

impl UssdRequest {
    /// Decode a `application/x-www-form-urlencoded` callback body.
    ///
    /// Blank values are dropped, then the first occurrence of a key wins. `text`
    /// defaults to the empty string.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::MissingField` with the wire name of the first required
    /// field that is absent or blank.
    pub fn from_form(body: &[u8]) -> Result<Self, RequestError> {
        let mut session_id = None;
        let mut service_code = None;
        let mut phone_number = None;
        let mut text = None;
        let mut network_code = None;

        for (key, value) in form_urlencoded::parse(body) {
            let slot = match &*key {
                fields::SESSION_ID => &mut session_id,
                fields::SERVICE_CODE => &mut service_code,
                fields::PHONE_NUMBER => &mut phone_number,
                fields::TEXT => &mut text,
                fields::NETWORK_CODE => &mut network_code,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }

        Ok(Self {
            session_id: session_id.ok_or(RequestError::MissingField(fields::SESSION_ID))?,
            service_code: service_code.ok_or(RequestError::MissingField(fields::SERVICE_CODE))?,
            phone_number: phone_number.ok_or(RequestError::MissingField(fields::PHONE_NUMBER))?,
            text: text.unwrap_or_default(),
            network_code: network_code.ok_or(RequestError::MissingField(fields::NETWORK_CODE))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_callback() {
        let body = b"sessionId=ATUid_1&serviceCode=%2A384%2A123%23&phoneNumber=%2B233241234567&text=2%2AGHA-1&networkCode=62001";
        let request = UssdRequest::from_form(body).unwrap();

        assert_eq!(
            request,
            UssdRequest {
                session_id: "ATUid_1".into(),
                service_code: "*384*123#".into(),
                phone_number: "+233241234567".into(),
                text: "2*GHA-1".into(),
                network_code: "62001".into(),
            }
        );
    }

    #[test]
    fn missing_text_means_session_start() {
        let body = b"sessionId=s&serviceCode=c&phoneNumber=p&networkCode=n";
        assert_eq!(UssdRequest::from_form(body).unwrap().text, "");
    }

    #[test]
    fn empty_text_value_is_kept_empty() {
        let body = b"sessionId=s&serviceCode=c&phoneNumber=p&text=&networkCode=n";
        assert_eq!(UssdRequest::from_form(body).unwrap().text, "");
    }

    #[test]
    fn reports_first_missing_required_field() {
        let body = b"sessionId=s&phoneNumber=p&text=1";
        assert_eq!(
            UssdRequest::from_form(body),
            Err(RequestError::MissingField("serviceCode"))
        );

        assert_eq!(
            UssdRequest::from_form(b""),
            Err(RequestError::MissingField("sessionId"))
        );
    }

    #[test]
    fn blank_required_value_is_missing() {
        let body = b"sessionId=s&serviceCode=c&phoneNumber=&text=1&networkCode=n";
        assert_eq!(
            UssdRequest::from_form(body),
            Err(RequestError::MissingField("phoneNumber"))
        );

        let body = b"sessionId=&serviceCode=c&phoneNumber=p&networkCode=n";
        assert_eq!(
            UssdRequest::from_form(body),
            Err(RequestError::MissingField("sessionId"))
        );
    }

    #[test]
    fn blank_occurrence_does_not_shadow_a_later_value() {
        let body = b"sessionId=&sessionId=s&serviceCode=c&phoneNumber=p&networkCode=n";
        assert_eq!(UssdRequest::from_form(body).unwrap().session_id, "s");
    }

    #[test]
    fn first_occurrence_wins_and_unknown_keys_are_ignored() {
        let body = b"sessionId=a&sessionId=b&serviceCode=c&phoneNumber=p&networkCode=n&extra=1";
        let request = UssdRequest::from_form(body).unwrap();
        assert_eq!(request.session_id, "a");
    }

    #[test]
    fn plus_decodes_to_space() {
        let body = b"sessionId=s&serviceCode=c&phoneNumber=+233&networkCode=n";
        assert_eq!(UssdRequest::from_form(body).unwrap().phone_number, " 233");
    }
}
