use crate::di::{Container, DependencyKey};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::sync::OnceLock;

/// Trait that application state implements to provide the root container
pub trait HasContainer {
    fn get_container(&self) -> &Container;
}

impl HasContainer for Container {
    fn get_container(&self) -> &Container {
        self
    }
}

/// Stateless routers resolve every key to its default unless a
/// `Container` extension is installed.
impl HasContainer for () {
    fn get_container(&self) -> &Container {
        static EMPTY: OnceLock<Container> = OnceLock::new();
        EMPTY.get_or_init(Container::new)
    }
}

/// The container visible to a request: the nearest `Extension(Container)`
/// layer wins over the state's root container.
fn visible<'a, S: HasContainer>(parts: &'a Parts, state: &'a S) -> &'a Container {
    parts
        .extensions
        .get::<Container>()
        .unwrap_or_else(|| state.get_container())
}

/// Axum extractor for a single dependency
///
/// Overriding a key for part of the route tree means layering a modified
/// snapshot onto that nested router:
///
/// ```rust,ignore
/// let stubbed = root.clone().with::<MailerKey>(Arc::new(NoopMailer));
/// let app = Router::new()
///     .route("/signup", post(signup))
///     .nest("/sandbox", sandbox_routes().layer(Extension(stubbed)))
///     .with_state(root);
///
/// async fn signup(Dep(mailer): Dep<MailerKey>) -> StatusCode {
///     mailer.send_welcome().await;
///     StatusCode::CREATED
/// }
/// ```
pub struct Dep<K: DependencyKey>(pub K::Value);

impl<S, K> FromRequestParts<S> for Dep<K>
where
    S: Send + Sync + HasContainer,
    K: DependencyKey,
    K::Value: Clone,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Dep(visible(parts, state).get::<K>().clone()))
    }
}

impl<K: DependencyKey> std::ops::Deref for Dep<K> {
    type Target = K::Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: DependencyKey> Clone for Dep<K>
where
    K::Value: Clone,
{
    fn clone(&self) -> Self {
        Dep(self.0.clone())
    }
}

/// Axum extractor for the whole container snapshot visible to a request
#[derive(Clone, Debug)]
pub struct Ambient(pub Container);

impl<S> FromRequestParts<S> for Ambient
where
    S: Send + Sync + HasContainer,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Ambient(visible(parts, state).clone()))
    }
}
