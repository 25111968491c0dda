//! Webhook signature verification.
//!
//! Verification is a pure function of `(raw body, signature header,
//! secret)` and fails closed: any malformed header, timestamp outside
//! tolerance, or signature mismatch yields a [`WebhookError`], never a
//! partially-trusted event.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::event::StripeEvent;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Parsed Stripe-Signature header components.
///
/// The header format is: `t=timestamp,v1=signature[,v0=legacy_signature]`.
/// Unknown keys are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe generated the event.
    pub timestamp: i64,

    /// Primary v1 signature (HMAC-SHA256, hex-decoded).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        if header.is_empty() {
            return Err(WebhookError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                return Err(WebhookError::ParseError(format!(
                    "expected key=value, got {:?}",
                    part
                )));
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signature = Some(hex_decode(value.trim()).ok_or_else(|| {
                        WebhookError::ParseError("signature is not valid hex".to_string())
                    })?);
                }
                _ => {
                    // Ignore v0 and unknown schemes
                }
            }
        }

        Ok(Self {
            timestamp: timestamp
                .ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?,
            v1_signature: v1_signature
                .ok_or_else(|| WebhookError::ParseError("missing v1 signature".to_string()))?,
        })
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

/// Verifies webhook signatures and constructs trusted events.
///
/// This is the only production constructor for [`StripeEvent`]: the raw
/// bytes are parsed into an event only after the signature over those
/// exact bytes has checked out.
pub struct WebhookVerifier {
    signing_secret: SecretString,
}

impl WebhookVerifier {
    /// Create a verifier for the given signing secret (whsec_...).
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: SecretString::new(signing_secret.into()),
        }
    }

    /// Verify a signature header against the raw payload and, on
    /// success, parse the payload into a trusted event.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;
        let now = chrono::Utc::now().timestamp();
        self.verify_signature(payload, &header, now)?;

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

        Ok(event)
    }

    /// Verify the v1 signature, including timestamp validation.
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
        now: i64,
    ) -> Result<(), WebhookError> {
        // Timestamp must be within tolerance before any HMAC work
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                signed_at = header.timestamp,
                age_secs = age,
                "Rejecting webhook: timestamp outside replay tolerance"
            );
            return Err(WebhookError::TimestampOutOfRange { age_secs: age });
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                signed_at = header.timestamp,
                now,
                "Rejecting webhook: timestamp ahead of server clock"
            );
            return Err(WebhookError::TimestampInFuture);
        }

        // Expected signature is HMAC-SHA256 over "{timestamp}.{raw_body}"
        let mut mac =
            HmacSha256::new_from_slice(self.signing_secret.expose_secret().as_bytes())
                .expect("HMAC can take key of any size");

        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        // Constant-time comparison; slices of unequal length compare
        // unequal without short-circuiting
        let expected_bytes: &[u8] = expected.as_slice();
        if expected_bytes.ct_eq(&header.v1_signature).unwrap_u8() != 1 {
            tracing::warn!("Rejecting webhook: signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "whsec_test_secret";

    fn test_verifier() -> WebhookVerifier {
        WebhookVerifier::new(TEST_SECRET)
    }

    fn hex_encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn sign(secret: &str, timestamp: i64, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let result = mac.finalize().into_bytes();

        format!("t={},v1={}", timestamp, hex_encode(&result))
    }

    fn event_json() -> String {
        r#"{
            "id": "evt_test123",
            "type": "invoice.payment_failed",
            "created": 1704067200,
            "data": {"object": {"id": "in_test"}},
            "livemode": false
        }"#
        .to_string()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Header Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_signature_header_valid() {
        let header = "t=1704067200,v1=5d41402abc4b2a76b9719d911017c592";
        let parsed = SignatureHeader::parse(header).unwrap();

        assert_eq!(parsed.timestamp, 1704067200);
        assert_eq!(
            hex_encode(&parsed.v1_signature),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn parse_signature_header_ignores_v0_and_unknown_keys() {
        let header = "t=1704067200,v1=aabbccdd,v0=deadbeef,v9=future";
        let parsed = SignatureHeader::parse(header).unwrap();
        assert_eq!(hex_encode(&parsed.v1_signature), "aabbccdd");
    }

    #[test]
    fn parse_signature_header_empty() {
        assert_eq!(
            SignatureHeader::parse(""),
            Err(WebhookError::MissingHeader)
        );
    }

    #[test]
    fn parse_signature_header_missing_timestamp() {
        let result = SignatureHeader::parse("v1=aabbccdd");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_signature_header_missing_v1() {
        let result = SignatureHeader::parse("t=1704067200,v0=aabbccdd");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_signature_header_invalid_timestamp() {
        let result = SignatureHeader::parse("t=not_a_number,v1=aabbccdd");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_signature_header_invalid_hex() {
        let result = SignatureHeader::parse("t=1704067200,v1=zzzz");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_signature_header_odd_length_hex() {
        let result = SignatureHeader::parse("t=1704067200,v1=abc");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Verification Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let verifier = test_verifier();
        let payload = event_json();
        let signature = sign(TEST_SECRET, chrono::Utc::now().timestamp(), payload.as_bytes());

        let event = verifier.verify_and_parse(payload.as_bytes(), &signature).unwrap();
        assert_eq!(event.id, "evt_test123");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let verifier = test_verifier();
        let payload = event_json();
        let signature = sign("whsec_other", chrono::Utc::now().timestamp(), payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &signature);
        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }

    #[test]
    fn verify_rejects_expired_timestamp() {
        let verifier = test_verifier();
        let payload = event_json();
        let old = chrono::Utc::now().timestamp() - 600;
        let signature = sign(TEST_SECRET, old, payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &signature);
        assert!(matches!(
            result,
            Err(WebhookError::TimestampOutOfRange { .. })
        ));
    }

    #[test]
    fn verify_rejects_future_timestamp() {
        let verifier = test_verifier();
        let payload = event_json();
        let future = chrono::Utc::now().timestamp() + 120;
        let signature = sign(TEST_SECRET, future, payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &signature);
        assert_eq!(result.unwrap_err(), WebhookError::TimestampInFuture);
    }

    #[test]
    fn verify_tolerates_small_clock_skew() {
        let verifier = test_verifier();
        let payload = event_json();
        // 30 seconds in the future should be tolerated
        let timestamp = chrono::Utc::now().timestamp() + 30;
        let signature = sign(TEST_SECRET, timestamp, payload.as_bytes());

        assert!(verifier.verify_and_parse(payload.as_bytes(), &signature).is_ok());
    }

    #[test]
    fn verify_rejects_invalid_json_after_signature_check() {
        let verifier = test_verifier();
        let payload = b"not valid json";
        let signature = sign(TEST_SECRET, chrono::Utc::now().timestamp(), payload);

        let result = verifier.verify_and_parse(payload, &signature);
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let verifier = test_verifier();
        let payload = event_json();
        let signature = sign(TEST_SECRET, chrono::Utc::now().timestamp(), payload.as_bytes());

        // Flip one byte after signing
        let mut tampered = payload.into_bytes();
        tampered[10] ^= 0x01;

        let result = verifier.verify_and_parse(&tampered, &signature);
        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }

    proptest! {
        // Any body signed with the right secret verifies; the same body
        // under a different secret does not.
        #[test]
        fn any_body_roundtrips_with_correct_secret(body in "\\PC{1,200}") {
            let verifier = test_verifier();
            let now = chrono::Utc::now().timestamp();
            let signature = sign(TEST_SECRET, now, body.as_bytes());

            let header = SignatureHeader::parse(&signature).unwrap();
            prop_assert!(verifier.verify_signature(body.as_bytes(), &header, now).is_ok());

            let wrong = WebhookVerifier::new("whsec_wrong");
            prop_assert!(wrong.verify_signature(body.as_bytes(), &header, now).is_err());
        }

        // Mutating any single byte of the body after signing must fail
        // verification.
        #[test]
        fn single_byte_mutation_breaks_signature(
            body in proptest::collection::vec(any::<u8>(), 1..200),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let verifier = test_verifier();
            let now = chrono::Utc::now().timestamp();
            let signature = sign(TEST_SECRET, now, &body);
            let header = SignatureHeader::parse(&signature).unwrap();

            let mut tampered = body.clone();
            let i = index.index(tampered.len());
            tampered[i] ^= flip;

            prop_assert_eq!(
                verifier.verify_signature(&tampered, &header, now),
                Err(WebhookError::InvalidSignature)
            );
        }
    }
}
