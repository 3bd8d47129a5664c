use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern compiles");
    static ref CPF_REGEX: Regex =
        Regex::new(r"\b\d{3}\.\d{3}\.\d{3}-\d{2}\b").expect("cpf pattern compiles");
    static ref PHONE_REGEX: Regex = Regex::new(r"\(\d{2}\)\s?9?\d{4}-\d{4}\b")
        .expect("phone pattern compiles");
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_cpf: bool,
    pub redact_phones: bool,
    pub hash_for_correlation: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_cpf: true,
            redact_phones: true,
            hash_for_correlation: true,
        }
    }
}

impl RedactionConfig {
    /// Configuration that leaves text untouched
    pub fn disabled() -> Self {
        Self {
            redact_emails: false,
            redact_cpf: false,
            redact_phones: false,
            hash_for_correlation: false,
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_cpf {
            result = self.replace(&CPF_REGEX, &result, "CPF", "***.***.***-**");
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_phones {
            result = self.replace(&PHONE_REGEX, &result, "PHONE", "(**) *****-****");
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let email = &caps[0];
                if self.config.hash_for_correlation {
                    return format!("EMAIL[{}]", self.hash_value(email));
                }
                match email.split_once('@') {
                    Some((local, domain)) => {
                        let head: String = local.chars().take(1).collect();
                        let domain_head: String = domain.chars().take(1).collect();
                        format!("{head}***@{domain_head}***")
                    }
                    None => "***@***".to_string(),
                }
            })
            .to_string()
    }

    fn replace(&self, pattern: &Regex, text: &str, label: &str, mask: &str) -> String {
        pattern
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("{label}[{}]", self.hash_value(&caps[0]))
                } else {
                    mask.to_string()
                }
            })
            .to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // first 8 bytes are enough to correlate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let redacted = masking_redactor().redact("Patient joana.silva@example.com rescheduled");
        assert_eq!(redacted, "Patient j***@e*** rescheduled");
    }

    #[test]
    fn test_cpf_redaction() {
        let redacted = masking_redactor().redact("start=123.456.789-09");
        assert_eq!(redacted, "start=***.***.***-**");
    }

    #[test]
    fn test_phone_redaction() {
        let redacted = masking_redactor().redact("Call (11) 98765-4321 after 5pm");
        assert_eq!(redacted, "Call (**) *****-**** after 5pm");
    }

    #[test]
    fn test_hashing_is_stable_for_correlation() {
        let redactor = PiiRedactor::default();
        let first = redactor.redact("ana@clinic.com.br");
        let second = redactor.redact("ana@clinic.com.br");
        assert!(first.starts_with("EMAIL["));
        assert_eq!(first, second);
        assert!(!first.contains("ana@"));
    }

    #[test]
    fn test_disabled_config_is_passthrough() {
        let redactor = PiiRedactor::new(RedactionConfig::disabled());
        let text = "ana@clinic.com.br 123.456.789-09";
        assert_eq!(redactor.redact(text), text);
    }

    #[test]
    fn test_dates_are_left_alone() {
        let redactor = masking_redactor();
        assert_eq!(redactor.redact("2025-12-01T00:00:00Z"), "2025-12-01T00:00:00Z");
    }
}
