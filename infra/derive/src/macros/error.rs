use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, Type, Variant};

/// Parsed shape of a single error variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    /// Fields besides `source` and `context`; such variants get no `From` impl.
    has_payload: bool,
    cfg_attrs: Vec<&'a Attribute>,
}

impl ErrorVariant<'_> {
    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }

    fn is_wrapper(&self) -> bool {
        self.source.is_some() && self.has_context && !self.has_payload && !self.is_internal()
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    match expand_inner(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand_inner(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "mcf_error can only be applied to enums"));
    };

    let variants = data.variants.iter().map(parse_variant).collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);
    let derives = missing_derives(&input.attrs);
    let ext_trait = ext_trait(name, &ext, &variants);
    let wrappers = variants.iter().filter(|v| v.is_wrapper()).map(|v| wrapper_impls(name, &ext, v));
    let internal = variants.iter().find(|v| v.is_internal()).map(|v| internal_impls(name, v));

    Ok(quote! {
        #derives
        #input

        #ext_trait
        #(#wrappers)*
        #internal

        #[allow(dead_code)]
        fn format_context(
            context: &::core::option::Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            match context {
                Some(context) => ::std::borrow::Cow::Owned(::std::format!(" ({context})")),
                None => ::std::borrow::Cow::Borrowed(""),
            }
        }
    })
}

fn parse_variant(variant: &Variant) -> syn::Result<ErrorVariant<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "mcf_error variants must use named fields (`Variant { message, context }`)",
        ));
    };

    let mut source = None;
    let mut has_context = false;
    let mut has_payload = false;

    for field in &fields.named {
        let is_named = |name: &str| field.ident.as_ref().is_some_and(|ident| ident == name);
        if is_named("context") {
            if !is_context_type(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "`context` must be `Option<Cow<'static, str>>`",
                ));
            }
            has_context = true;
        } else if is_named("source") || has_attr(field, "source") || has_attr(field, "from") {
            source = Some(field);
        } else {
            has_payload = true;
        }
    }

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "mcf_error variants with a source also need `context: Option<Cow<'static, str>>`",
        ));
    }

    Ok(ErrorVariant {
        ident: &variant.ident,
        source,
        has_context,
        has_payload,
        cfg_attrs: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
    })
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                present.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let debug = (!present.contains("Debug")).then(|| quote!(Debug));
    let error = (!present.contains("Error")).then(|| quote!(::thiserror::Error));
    let derives: Vec<_> = debug.into_iter().chain(error).collect();

    if derives.is_empty() { quote!() } else { quote!(#[derive(#(#derives),*)]) }
}

fn ext_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg_attrs = &v.cfg_attrs;
        quote! { #(#cfg_attrs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        /// Attaches human-readable context to a failed result.
        pub trait #ext<T> {
            /// Records `context` on the error, replacing any previous context.
            ///
            /// # Errors
            /// Returns the original error, converted and annotated.
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    #[allow(unreachable_patterns)]
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn wrapper_impls(name: &Ident, ext: &Ident, variant: &ErrorVariant<'_>) -> TokenStream {
    let ident = variant.ident;
    let cfg_attrs = &variant.cfg_attrs;
    let Some(field) = variant.source else { return quote!() };
    let (Some(field_ident), ty) = (field.ident.as_ref(), &field.ty) else { return quote!() };

    quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl ::core::convert::From<#ty> for #name {
            #[inline]
            fn from(#field_ident: #ty) -> Self {
                Self::#ident { #field_ident, context: None }
            }
        }

        #(#cfg_attrs)*
        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name> {
                self.map_err(|#field_ident| #name::#ident { #field_ident, context: Some(context.into()) })
            }
        }
    }
}

fn internal_impls(name: &Ident, variant: &ErrorVariant<'_>) -> TokenStream {
    let cfg_attrs = &variant.cfg_attrs;
    quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl ::core::convert::From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg_attrs)*
        #[automatically_derived]
        impl ::core::convert::From<::std::string::String> for #name {
            #[inline]
            fn from(message: ::std::string::String) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Matches `Option<Cow<'static, str>>` regardless of path qualification.
fn is_context_type(ty: &Type) -> bool {
    fn segment<'a>(ty: &'a Type, name: &str) -> Option<&'a syn::PathSegment> {
        let Type::Path(path) = ty else { return None };
        path.path.segments.last().filter(|segment| segment.ident == name)
    }

    fn args(segment: &syn::PathSegment) -> impl Iterator<Item = &GenericArgument> {
        match &segment.arguments {
            syn::PathArguments::AngleBracketed(args) => Some(args.args.iter()),
            _ => None,
        }
        .into_iter()
        .flatten()
    }

    let Some(option) = segment(ty, "Option") else { return false };
    let mut option_args = args(option);
    let (Some(GenericArgument::Type(inner)), None) = (option_args.next(), option_args.next())
    else {
        return false;
    };

    let Some(cow) = segment(inner, "Cow") else { return false };
    let mut cow_args = args(cow);
    let (Some(GenericArgument::Lifetime(lt)), Some(GenericArgument::Type(target)), None) =
        (cow_args.next(), cow_args.next(), cow_args.next())
    else {
        return false;
    };

    lt.ident == "static" && segment(target, "str").is_some()
}
