use uuid::Uuid;

pub const WORKER_QR_PREFIX: &str = "WORKER_";

/// Issues a fresh scan token for a new worker. The token is immutable for the
/// worker's lifetime; an external encoder renders it as a scannable image.
pub fn generate_worker_qr_code() -> String {
    format!("{WORKER_QR_PREFIX}{}", Uuid::new_v4())
}

/// Shape check only. Resolution against a real worker happens in the database.
pub fn is_valid_worker_qr_code(qr_code: &str) -> bool {
    qr_code.starts_with(WORKER_QR_PREFIX) && qr_code.len() > WORKER_QR_PREFIX.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefixed_tokens() {
        assert!(is_valid_worker_qr_code("WORKER_abc123"));
        assert!(is_valid_worker_qr_code(&generate_worker_qr_code()));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(!is_valid_worker_qr_code("abc123"));
        assert!(!is_valid_worker_qr_code(""));
        assert!(!is_valid_worker_qr_code("WORKER_"));
        assert!(!is_valid_worker_qr_code("worker_abc123"));
    }

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(generate_worker_qr_code(), generate_worker_qr_code());
    }
}
