//! # Actions
//!
//! An [`Action`] is a named operation a resource exposes over HTTP: a set of
//! methods, an optional route fragment relative to the resource's base URL, and
//! a handler.
//!
//! Handlers implement [`ActionHandler`]. Any async closure taking a
//! [`RequestContainer`] and returning `Result<impl Into<ActionOutput>, HandlerError>`
//! is a handler already, so most resources never name the trait.
//!
//! ```rust
//! use resource_routes::{Action, HandlerError, RequestContainer, ResourceInstance};
//!
//! let show = Action::new("show", ["GET"], |req: RequestContainer| async move {
//!     let id = req.url_param("id").unwrap_or_default().to_string();
//!     Ok::<_, HandlerError>(ResourceInstance::new().with_property("id", id))
//! });
//! assert_eq!(show.name(), "show");
//! ```

use crate::instance::ResourceInstance;
use crate::request::RequestContainer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Error type returned by action handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// METHOD SET
// =============================================================================

/// An ordered set of upper-case HTTP verbs.
///
/// Ordering makes compiled route tables deterministic. Deserialized sets go
/// through [`MethodSet::insert`] too, so loaded route tables stay normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MethodSet(BTreeSet<String>);

/// A blank verb in a deserialized [`MethodSet`].
#[derive(Debug, Error)]
#[error("blank HTTP method")]
pub struct BlankMethod;

impl MethodSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a verb, upper-cased and trimmed. Returns `false` if it was blank.
    pub fn insert(&mut self, method: &str) -> bool {
        let method = method.trim();
        if method.is_empty() {
            return false;
        }
        self.0.insert(method.to_ascii_uppercase());
        true
    }

    pub fn contains(&self, method: &str) -> bool {
        self.0.contains(&method.trim().to_ascii_uppercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn overlaps(&self, other: &MethodSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    pub fn intersection(&self, other: &MethodSet) -> MethodSet {
        MethodSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join("|"))
    }
}

impl TryFrom<Vec<String>> for MethodSet {
    type Error = BlankMethod;

    fn try_from(methods: Vec<String>) -> Result<Self, BlankMethod> {
        let mut set = MethodSet::new();
        for method in &methods {
            if !set.insert(method) {
                return Err(BlankMethod);
            }
        }
        Ok(set)
    }
}

impl From<MethodSet> for Vec<String> {
    fn from(methods: MethodSet) -> Self {
        methods.0.into_iter().collect()
    }
}

/// Collects verbs, dropping blanks. Use [`MethodSet::insert`] to detect them.
impl<S: AsRef<str>> FromIterator<S> for MethodSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = MethodSet::new();
        for method in iter {
            set.insert(method.as_ref());
        }
        set
    }
}

// =============================================================================
// HANDLER CONTRACT
// =============================================================================

/// What an action handler produced.
///
/// Only [`ActionOutput::Instance`] satisfies the handler contract; the other
/// variants exist so type-erased handlers can report what they returned and the
/// caller can surface an
/// [`ActionContractViolation`](crate::ResourceError::ActionContractViolation).
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    Instance(ResourceInstance),
    Value(serde_json::Value),
    Empty,
}

impl ActionOutput {
    /// Short description used in contract-violation diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionOutput::Instance(_) => "a resource instance",
            ActionOutput::Value(_) => "a plain value",
            ActionOutput::Empty => "nothing",
        }
    }
}

impl From<ResourceInstance> for ActionOutput {
    fn from(instance: ResourceInstance) -> Self {
        ActionOutput::Instance(instance)
    }
}

impl From<serde_json::Value> for ActionOutput {
    fn from(value: serde_json::Value) -> Self {
        ActionOutput::Value(value)
    }
}

impl From<()> for ActionOutput {
    fn from(_: ()) -> Self {
        ActionOutput::Empty
    }
}

/// The operation bound to an action.
///
/// Receives the normalized request and must produce exactly one resource instance.
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    async fn call(&self, request: RequestContainer) -> Result<ActionOutput, HandlerError>;
}

#[async_trait]
impl<F, Fut, O> ActionHandler for F
where
    F: Fn(RequestContainer) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    O: Into<ActionOutput> + Send + 'static,
{
    async fn call(&self, request: RequestContainer) -> Result<ActionOutput, HandlerError> {
        (self)(request).await.map(Into::into)
    }
}

// =============================================================================
// ACTION DECLARATION
// =============================================================================

/// One route an action is reachable on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRoute {
    /// Path relative to the base URL; `None` means the base URL itself.
    pub fragment: Option<String>,
    pub methods: MethodSet,
}

/// A named, method-tagged operation on a resource type.
#[derive(Clone)]
pub struct Action {
    name: String,
    routes: Vec<ActionRoute>,
    /// Verbs as declared, kept raw so the registry can reject blanks.
    declared: Vec<Vec<String>>,
    handler: Arc<dyn ActionHandler>,
}

impl Action {
    /// Declares an action bound to the resource's base URL.
    pub fn new<M, S, H>(name: impl Into<String>, methods: M, handler: H) -> Self
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
        H: ActionHandler,
    {
        let declared: Vec<String> = methods.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            routes: vec![ActionRoute {
                fragment: None,
                methods: declared.iter().collect(),
            }],
            declared: vec![declared],
            handler: Arc::new(handler),
        }
    }

    /// Sets the explicit route fragment of the primary route.
    pub fn route(mut self, fragment: impl Into<String>) -> Self {
        self.routes[0].fragment = Some(fragment.into());
        self
    }

    /// Exposes the same action on an additional route/method combination.
    pub fn also_route<M, S>(mut self, fragment: Option<&str>, methods: M) -> Self
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared: Vec<String> = methods.into_iter().map(Into::into).collect();
        self.routes.push(ActionRoute {
            fragment: fragment.map(str::to_string),
            methods: declared.iter().collect(),
        });
        self.declared.push(declared);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Routes in declaration order; the first one is the primary route.
    pub fn routes(&self) -> &[ActionRoute] {
        &self.routes
    }

    /// Methods of the primary route.
    pub fn http_methods(&self) -> &MethodSet {
        &self.routes[0].methods
    }

    /// Fragment of the primary route.
    pub fn route_fragment(&self) -> Option<&str> {
        self.routes[0].fragment.as_deref()
    }

    pub fn handler(&self) -> &Arc<dyn ActionHandler> {
        &self.handler
    }

    /// Returns the reason this declaration is malformed, if it is.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("action name is blank".into());
        }
        for declared in &self.declared {
            if declared.is_empty() {
                return Err("no HTTP methods declared".into());
            }
            if declared.iter().any(|m| m.trim().is_empty()) {
                return Err("blank HTTP method".into());
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop(_: RequestContainer) -> Result<ResourceInstance, HandlerError> {
        Ok(ResourceInstance::new())
    }

    #[test]
    fn test_method_set_normalizes() {
        let methods: MethodSet = ["get", " Post ", "GET"].into_iter().collect();
        assert_eq!(methods.len(), 2);
        assert!(methods.contains("GET"));
        assert!(methods.contains("post"));
        assert_eq!(methods.to_string(), "GET|POST");
    }

    #[test]
    fn test_method_set_deserializes_normalized() {
        let methods: MethodSet = serde_json::from_str(r#"["get", " Put "]"#).unwrap();
        assert!(methods.contains("GET"));
        assert_eq!(methods.to_string(), "GET|PUT");
        assert_eq!(serde_json::to_string(&methods).unwrap(), r#"["GET","PUT"]"#);

        let err = serde_json::from_str::<MethodSet>(r#"["get", " "]"#).unwrap_err();
        assert!(err.to_string().contains("blank HTTP method"));
    }

    #[test]
    fn test_method_set_overlap() {
        let a: MethodSet = ["GET", "PUT"].into_iter().collect();
        let b: MethodSet = ["put", "DELETE"].into_iter().collect();
        let c: MethodSet = ["POST"].into_iter().collect();
        assert!(a.overlaps(&b));
        assert_eq!(a.intersection(&b).to_string(), "PUT");
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_action_routes() {
        let action = Action::new("items", ["GET"], noop)
            .route("items")
            .also_route(Some("items/<item>"), ["GET", "DELETE"]);
        assert_eq!(action.route_fragment(), Some("items"));
        assert_eq!(action.routes().len(), 2);
        assert_eq!(action.routes()[1].methods.to_string(), "DELETE|GET");
        assert!(action.validate().is_ok());
    }

    #[test]
    fn test_action_validation() {
        let empty = Action::new("show", Vec::<String>::new(), noop);
        assert_eq!(empty.validate().unwrap_err(), "no HTTP methods declared");

        let blank = Action::new("show", ["GET", " "], noop);
        assert_eq!(blank.validate().unwrap_err(), "blank HTTP method");

        let unnamed = Action::new(" ", ["GET"], noop);
        assert_eq!(unnamed.validate().unwrap_err(), "action name is blank");

        let extra = Action::new("show", ["GET"], noop).also_route(Some("x"), Vec::<&str>::new());
        assert!(extra.validate().is_err());
    }

    #[tokio::test]
    async fn test_closure_handler_output() {
        let action = Action::new("ping", ["GET"], |_req: RequestContainer| async {
            Ok::<_, HandlerError>(serde_json::json!({"pong": true}))
        });
        let output = action.handler().call(RequestContainer::new()).await.unwrap();
        assert_eq!(output.kind(), "a plain value");
    }
}
