use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::{Data, DeriveInput, Fields, Ident, LitInt, LitStr, Path, Type, parse_quote};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Construct {
    /// All tagged fields are handed to a generated creator in order.
    Creator,
    /// `Self::default()` followed by one setter per tagged field.
    Setters,
}

struct ModelArgs {
    construct: Construct,
    krate: Path,
}

impl Default for ModelArgs {
    fn default() -> Self {
        Self { construct: Construct::Creator, krate: parse_quote!(::mcf_format) }
    }
}

struct MappedField {
    ident: Ident,
    ty: Type,
    order: LitInt,
    key: LitStr,
}

/// Expands the `#[mcf_model]` attribute macro.
pub fn expand(args: TokenStream, input: DeriveInput) -> TokenStream {
    match expand_inner(args, input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand_inner(args: TokenStream, mut input: DeriveInput) -> syn::Result<TokenStream> {
    let args = parse_args(args)?;
    let (mapped, skipped) = split_fields(&mut input)?;

    let krate = &args.krate;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = mapped.iter().map(|field| {
        let MappedField { ident, ty, order, key } = field;
        match args.construct {
            Construct::Creator => quote! {
                .field(#krate::FieldDescriptor::readonly(#order, #key, |entity: &Self| &entity.#ident))
            },
            Construct::Setters => quote! {
                .field(#krate::FieldDescriptor::writable(
                    #order,
                    #key,
                    |entity: &Self| &entity.#ident,
                    |entity: &mut Self, value: #ty| entity.#ident = value,
                ))
            },
        }
    });

    let construction = match args.construct {
        Construct::Creator => creator_tokens(krate, &mapped, &skipped)?,
        Construct::Setters => quote! { .empty(<Self as ::core::default::Default>::default) },
    };

    Ok(quote! {
        #input

        #[automatically_derived]
        impl #impl_generics #krate::McfModel for #name #ty_generics #where_clause {
            fn schema() -> #krate::Schema<Self> {
                #krate::Schema::new()
                    #(#descriptors)*
                    #construction
            }
        }
    })
}

fn parse_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let mut parsed = ModelArgs::default();

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("construct") {
            let value: LitStr = meta.value()?.parse()?;
            parsed.construct = match value.value().as_str() {
                "creator" => Construct::Creator,
                "setters" => Construct::Setters,
                _ => {
                    return Err(syn::Error::new_spanned(
                        value,
                        "expected `construct = \"creator\"` or `construct = \"setters\"`",
                    ));
                },
            };
            Ok(())
        } else if meta.path.is_ident("crate") {
            let value: LitStr = meta.value()?.parse()?;
            parsed.krate = value.parse()?;
            Ok(())
        } else {
            Err(meta.error("unsupported mcf_model argument; expected `construct` or `crate`"))
        }
    });
    parser.parse2(args)?;

    Ok(parsed)
}

/// Collects `#[mcf(...)]` tagged fields and strips the helper attribute from the struct.
fn split_fields(input: &mut DeriveInput) -> syn::Result<(Vec<MappedField>, Vec<Ident>)> {
    let span_source = input.ident.clone();
    let Data::Struct(data) = &mut input.data else {
        return Err(syn::Error::new_spanned(span_source, "mcf_model only supports structs"));
    };
    let Fields::Named(fields) = &mut data.fields else {
        return Err(syn::Error::new_spanned(
            span_source,
            "mcf_model only supports structs with named fields",
        ));
    };

    let mut mapped = Vec::new();
    let mut skipped = Vec::new();

    for field in &mut fields.named {
        let Some(ident) = field.ident.clone() else { continue };

        let mut order = None;
        let mut key = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("mcf")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("order") {
                    let value = meta.value()?;
                    if value.peek(syn::Token![-]) {
                        return Err(value.error("`order` must be a non-negative integer"));
                    }
                    order = Some(value.parse::<LitInt>()?);
                    Ok(())
                } else if meta.path.is_ident("name") {
                    key = Some(meta.value()?.parse::<LitStr>()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported mcf field option; expected `order` or `name`"))
                }
            })?;
        }
        field.attrs.retain(|attr| !attr.path().is_ident("mcf"));

        let Some(order) = order else {
            skipped.push(ident);
            continue;
        };
        // Ordering rules beyond the range check are enforced at runtime.
        order
            .base10_parse::<u32>()
            .map_err(|_| syn::Error::new(order.span(), "`order` must fit in u32"))?;

        let key = key.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
        mapped.push(MappedField { ident, ty: field.ty.clone(), order, key });
    }

    Ok((mapped, skipped))
}

fn creator_tokens(
    krate: &Path,
    mapped: &[MappedField],
    skipped: &[Ident],
) -> syn::Result<TokenStream> {
    let mut by_order = Vec::with_capacity(mapped.len());
    for field in mapped {
        by_order.push((field.order.base10_parse::<u32>()?, field));
    }
    by_order.sort_by_key(|(order, _)| *order);

    let takes = by_order.iter().map(|(_, field)| {
        let binding = format_ident!("__mcf_{}", field.ident);
        let ty = &field.ty;
        quote! { let #binding = arguments.take::<#ty>()?; }
    });
    let assigns = mapped.iter().map(|field| {
        let ident = &field.ident;
        let binding = format_ident!("__mcf_{}", ident);
        quote! { #ident: #binding }
    });

    Ok(quote! {
        .creator(|arguments: &mut #krate::Arguments| {
            #(#takes)*
            ::core::result::Result::Ok(Self {
                #(#assigns,)*
                #(#skipped: ::core::default::Default::default(),)*
            })
        })
    })
}
