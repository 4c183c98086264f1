use axum::extract::FromRef;
use fxhash::FxHashMap;
use keel_domain::config::Settings;
use keel_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[keel_derive::keel_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub settings: Settings,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Shared application state handed to every router.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get(&TypeId::of::<T>()).and_then(InitializedSlice::downcast_ref::<T>)
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns an error if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Names of the registered slices, sorted (for diagnostics).
    #[must_use]
    pub fn slice_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.slices.values().map(InitializedSlice::name).collect();
        names.sort_unstable();
        names
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for Settings {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.settings.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    settings: Option<Settings>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// Registers multiple slices at once.
    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        for slice in slices {
            self.slices.insert(slice.id, slice);
        }
        self
    }

    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let settings = self.settings.ok_or_else(|| ApiStateError::Validation {
            message: "Settings not provided".into(),
            context: None,
        })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { settings, slices: self.slices }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    #[derive(Debug)]
    struct Counter(u32);

    impl FeatureSlice for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn build_requires_settings() {
        let err = ApiState::builder().build().unwrap_err();
        assert!(matches!(err, ApiStateError::Validation { .. }));
    }

    #[test]
    fn registered_slices_are_retrievable() {
        let state = ApiState::builder()
            .settings(Settings::default())
            .register_slice(InitializedSlice::new(Counter(3)))
            .build()
            .unwrap();

        assert_eq!(state.get_slice::<Counter>().map(|c| c.0), Some(3));
        assert_eq!(state.slice_names(), vec!["counter"]);
        assert_eq!(Settings::from_ref(&state).port, 8000);
    }

    #[test]
    fn missing_slice_is_an_error() {
        let state = ApiState::builder().settings(Settings::default()).build().unwrap();
        let err = state.try_get_slice::<Counter>().unwrap_err();
        assert!(err.to_string().contains("Counter"));
    }
}
