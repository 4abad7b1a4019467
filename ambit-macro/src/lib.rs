use proc_macro::TokenStream;

mod injectable;
mod key;

/// Derive macro for declaring a dependency key
///
/// The key type itself is the lookup handle; `value` names the type it
/// governs and `default` an optional zero-argument factory. Without
/// `default`, the value's `Default` impl is used.
///
/// # Example
/// ```ignore
/// use ambit::DependencyKey;
///
/// #[derive(DependencyKey)]
/// #[key(value = "Arc<dyn Mailer>", default = "default_mailer")]
/// pub struct MailerKey;
/// ```
#[proc_macro_derive(DependencyKey, attributes(key))]
pub fn derive_dependency_key(input: TokenStream) -> TokenStream {
    key::derive_dependency_key(input)
}

/// Derive macro for configuring a struct from a container
///
/// Fields marked `#[inject(SomeKey)]` are assigned from the container when
/// the value is attached. `#[inject(SomeKey, optional)]` on an `Option<_>`
/// field takes the explicit binding, and is set to `None` when the key has
/// none. Other fields are left untouched.
///
/// # Example
/// ```ignore
/// use ambit::Injectable;
///
/// #[derive(Default, Injectable)]
/// pub struct Checkout {
///     #[inject(MailerKey)]
///     mailer: Arc<dyn Mailer>,
///     items: Vec<String>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable(input)
}
