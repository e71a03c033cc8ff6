//! Derive macro for the pullscout `ToolSchema` trait.
//!
//! Named-field structs become object shapes whose `Option<_>` fields are not
//! required; enums made only of unit variants become string scalars. Struct
//! and field descriptions come from `#[schema(description = "...")]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DataStruct, DeriveInput, Fields, GenericArgument, LitStr,
    PathArguments, Type, parse_macro_input,
};

/// Implements `ToolSchema` for a named-field struct or unit-variant enum.
#[proc_macro_derive(ToolSchema, attributes(schema))]
pub fn derive_tool_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    match &input.data {
        Data::Struct(data) => expand_struct(input, data),
        Data::Enum(data) => expand_enum(input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "ToolSchema cannot be derived for unions",
        )),
    }
}

fn expand_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<proc_macro2::TokenStream> {
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ToolSchema structs must have named fields",
        ));
    };

    let mut pushes = Vec::new();
    for field in &fields.named {
        let ident = field.ident.as_ref().expect("named field");
        let name = ident.to_string();
        let description = description_of(&field.attrs)?.unwrap_or_default();
        let (ty, required) = match option_inner(&field.ty) {
            Some(inner) => (inner.clone(), false),
            None => (field.ty.clone(), true),
        };
        pushes.push(quote! {
            object.push_property(
                ::pullscout_schema::Property::new(
                    #name,
                    #description,
                    <#ty as ::pullscout_schema::ToolSchema>::schema_in(tracker),
                ),
                #required,
            );
        });
    }

    let object_init = match description_of(&input.attrs)? {
        Some(text) => quote! {
            ::pullscout_schema::ObjectSchema::new().with_description(#text)
        },
        None => quote! { ::pullscout_schema::ObjectSchema::new() },
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::pullscout_schema::ToolSchema for #ident #ty_generics #where_clause {
            fn schema_in(
                tracker: &mut ::pullscout_schema::SchemaTracker,
            ) -> ::pullscout_schema::StructuralSchema {
                if !tracker.enter::<Self>() {
                    return ::pullscout_schema::StructuralSchema::Reference;
                }
                #[allow(unused_mut)]
                let mut object = #object_init;
                #(#pushes)*
                tracker.exit::<Self>();
                ::pullscout_schema::StructuralSchema::Object(object)
            }
        }
    })
}

fn expand_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<proc_macro2::TokenStream> {
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ToolSchema enums must contain unit variants only",
            ));
        }
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::pullscout_schema::ToolSchema for #ident #ty_generics #where_clause {
            fn schema_in(
                _tracker: &mut ::pullscout_schema::SchemaTracker,
            ) -> ::pullscout_schema::StructuralSchema {
                ::pullscout_schema::StructuralSchema::Scalar(
                    ::pullscout_schema::ScalarKind::String,
                )
            }
        }
    })
}

fn description_of(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if !attr.path().is_ident("schema") {
            continue;
        }
        let mut description = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("description") {
                let value: LitStr = meta.value()?.parse()?;
                description = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported schema attribute"))
            }
        })?;
        return Ok(description);
    }
    Ok(None)
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    if arguments.args.len() != 1 {
        return None;
    }
    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
