extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, parse_macro_input, parse_quote, Ident, Item, LitStr, Result, Token};

// --- Macro arguments ---
struct ModelArgs {
    name: Option<LitStr>,
}

impl Parse for ModelArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(ModelArgs { name: None });
        }
        let key: Ident = input.parse()?;
        if key != "name" {
            return Err(syn::Error::new(key.span(), "expected `name = \"...\"`"));
        }
        input.parse::<Token![=]>()?;
        let name: LitStr = input.parse()?;
        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "model name must not be empty"));
        }
        input.parse::<Option<Token![,]>>()?;
        Ok(ModelArgs { name: Some(name) })
    }
}

/// Gives a struct or enum a `restdoc::TypeInfo` implementation so it can be
/// used as a request sample or response model.
///
/// The definition name defaults to the module path of the item followed by
/// its identifier (`bookstore::models::Book`). It can be set explicitly:
///
/// ```ignore
/// #[api_model(name = "models.Book")]
/// struct Book { title: String }
/// ```
///
/// Generic parameters must implement `TypeInfo` themselves; their names are
/// appended in brackets (`Page[models.Book]`).
#[proc_macro_attribute]
pub fn api_model(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as ModelArgs);
    let item = parse_macro_input!(input as Item);

    let (ident, generics) = match &item {
        Item::Struct(s) => (&s.ident, &s.generics),
        Item::Enum(e) => (&e.ident, &e.generics),
        other => {
            return syn::Error::new_spanned(other, "#[api_model] can only be applied to structs and enums")
                .to_compile_error()
                .into();
        }
    };

    let base_name = match &args.name {
        Some(name) => quote! { #name },
        None => quote! { concat!(module_path!(), "::", stringify!(#ident)) },
    };

    let mut generics = generics.clone();
    let type_params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::restdoc::introspect::TypeInfo));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptor = if type_params.is_empty() {
        quote! { ::restdoc::introspect::TypeDescriptor::composite(#base_name) }
    } else {
        quote! {
            {
                let arguments: ::std::vec::Vec<::std::string::String> = ::std::vec![
                    #(<#type_params as ::restdoc::introspect::TypeInfo>::type_descriptor()
                        .canonical_name()
                        .into_owned()),*
                ];
                ::restdoc::introspect::TypeDescriptor::composite(
                    ::std::format!("{}[{}]", #base_name, arguments.join(","))
                )
            }
        }
    };

    let output = quote! {
        #item

        impl #impl_generics ::restdoc::introspect::TypeInfo for #ident #ty_generics #where_clause {
            fn type_descriptor() -> ::restdoc::introspect::TypeDescriptor {
                #descriptor
            }
        }
    };

    output.into()
}
