use shared::protocol::ModelStatus;

pub const MODEL_ONLINE: &str = "Model Online";
pub const MODEL_OFFLINE: &str = "Model Offline";

/// An unknown status renders as offline.
pub fn is_online(status: Option<&ModelStatus>) -> bool {
    status.is_some_and(|status| status.model_loaded)
}

pub fn status_label(status: Option<&ModelStatus>) -> &'static str {
    if is_online(status) {
        MODEL_ONLINE
    } else {
        MODEL_OFFLINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_unloaded_model_is_offline() {
        assert_eq!(status_label(None), MODEL_OFFLINE);
        assert_eq!(
            status_label(Some(&ModelStatus {
                model_loaded: false
            })),
            MODEL_OFFLINE
        );
        assert_eq!(
            status_label(Some(&ModelStatus { model_loaded: true })),
            MODEL_ONLINE
        );
    }
}
