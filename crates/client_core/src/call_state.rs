use serde::{Deserialize, Serialize};

/// Loading/error/data triple for one remote resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for CallState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> CallState<T> {
    /// Marks a new attempt in flight. The previous snapshot stays visible.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }
}
