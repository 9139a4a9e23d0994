//! ulpcheck Macros
//!
//! Procedural macro for test registration.
//!
//! ## Macros
//!
//! - `#[ulpcheck::unittest]` - Register a test function, optionally expecting
//!   an error type or instantiated once per type argument

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

// ============================================================================
// Attribute Parsing Helpers
// ============================================================================

mod attr {
    use syn::meta::ParseNestedMeta;
    use syn::punctuated::Punctuated;

    /// Get the attribute name as a string
    pub fn name(meta: &ParseNestedMeta) -> String {
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    }

    /// Parse a string literal attribute: `attr = "value"`
    pub fn string(meta: &ParseNestedMeta) -> syn::Result<String> {
        let value: syn::LitStr = meta.value()?.parse()?;
        Ok(value.value())
    }

    /// Parse a type attribute: `attr = path::To<Type>`
    pub fn ty(meta: &ParseNestedMeta) -> syn::Result<syn::Type> {
        meta.value()?.parse()
    }

    /// Parse a parenthesised type list: `attr(f32, f64, [f32; 4])`
    pub fn type_list(meta: &ParseNestedMeta) -> syn::Result<Vec<syn::Type>> {
        let content;
        syn::parenthesized!(content in meta.input);
        let items: Punctuated<syn::Type, syn::Token![,]> = Punctuated::parse_terminated(&content)?;
        Ok(items.into_iter().collect())
    }

    /// Create an unknown attribute error
    pub fn unknown(meta: &ParseNestedMeta, name: &str) -> syn::Error {
        meta.error(format!("unknown attribute: {}", name))
    }
}

/// Register a test function
///
/// The function takes `&mut TestContext` and returns `TestResult`.
///
/// # Example
///
/// ```ignore
/// #[ulpcheck::unittest]
/// fn sqrt_of_four(ctx: &mut TestContext) -> TestResult {
///     compare!(ctx, 4.0f64.sqrt(), 2.0);
///     Ok(())
/// }
///
/// // Display name override, passes only if `ParseError` escapes
/// #[ulpcheck::unittest(name = "rejects garbage", raises = ParseError)]
/// fn rejects_garbage(_ctx: &mut TestContext) -> TestResult {
///     parse("garbage")?;
///     Ok(())
/// }
///
/// // One instance per type, shown as `roundtrip<f32>`, `roundtrip<f64>`
/// #[ulpcheck::unittest(types(f32, f64))]
/// fn roundtrip<T: Float>(ctx: &mut TestContext) -> TestResult { ... }
/// ```
#[proc_macro_attribute]
pub fn unittest(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = TokenStream2::from(args);
    let func = parse_macro_input!(item as ItemFn);

    unittest_impl(args, func)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

#[derive(Default)]
struct TestConfig {
    name: Option<String>,
    raises: Option<syn::Type>,
    types: Vec<syn::Type>,
}

fn unittest_impl(args: TokenStream2, func: ItemFn) -> Result<TokenStream2, syn::Error> {
    validate_signature(&func)?;
    let config = parse_test_config(args)?;

    let generic = !func.sig.generics.params.is_empty();
    if generic && config.types.is_empty() {
        return Err(syn::Error::new_spanned(
            &func.sig.generics,
            "ulpcheck: generic tests need `types(...)` to choose their instances",
        ));
    }
    if !generic && !config.types.is_empty() {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "ulpcheck: `types(...)` requires a function with one type parameter",
        ));
    }

    let fn_name = &func.sig.ident;
    let name = config.name.unwrap_or_else(|| fn_name.to_string());
    let expected = config
        .raises
        .map(|ty| quote! { Some(::ulpcheck::ExpectedError::of::<#ty>()) })
        .unwrap_or(quote! { None });

    if config.types.is_empty() {
        return Ok(quote! {
            #func

            ::ulpcheck::internal::inventory::submit! {
                ::ulpcheck::TestDef {
                    name: #name,
                    entry: #fn_name,
                    expected: #expected,
                    file: file!(),
                    line: line!(),
                    module_path: module_path!(),
                }
            }
        });
    }

    let instances = config.types.iter().map(|ty| {
        quote! { ::ulpcheck::TypeInstance::of::<#ty>(#fn_name::<#ty>) }
    });

    Ok(quote! {
        #func

        ::ulpcheck::internal::inventory::submit! {
            ::ulpcheck::TypedTestDef {
                name: #name,
                instances: &[#(#instances),*],
                expected: #expected,
                file: file!(),
                line: line!(),
                module_path: module_path!(),
            }
        }
    })
}

fn parse_test_config(args: TokenStream2) -> Result<TestConfig, syn::Error> {
    let mut config = TestConfig::default();

    if args.is_empty() {
        return Ok(config);
    }

    let parser = syn::meta::parser(|meta| {
        let name = attr::name(&meta);
        match name.as_str() {
            "name" => config.name = Some(attr::string(&meta)?),
            "raises" => config.raises = Some(attr::ty(&meta)?),
            "types" => config.types = attr::type_list(&meta)?,
            _ => return Err(attr::unknown(&meta, &name)),
        }
        Ok(())
    });

    syn::parse::Parser::parse2(parser, args)?;
    Ok(config)
}

fn validate_signature(func: &ItemFn) -> syn::Result<()> {
    if func.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "ulpcheck: a test takes exactly one argument: `&mut TestContext`",
        ));
    }
    if func.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            func.sig.asyncness,
            "ulpcheck: async tests are not supported",
        ));
    }
    if matches!(func.sig.output, syn::ReturnType::Default) {
        return Err(syn::Error::new_spanned(
            &func.sig,
            "ulpcheck: a test must return `TestResult`",
        ));
    }
    Ok(())
}
