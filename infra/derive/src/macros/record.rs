use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, Type};

/// One mapped field after `#[record(...)]` options are applied.
struct MappedField {
    ident: Ident,
    ty: Type,
    identifier: LitStr,
    label: Option<LitStr>,
}

#[derive(Default)]
struct FieldOptions {
    label: Option<LitStr>,
    rename: Option<LitStr>,
    skip: bool,
}

fn named_fields(input: &DeriveInput) -> Result<Vec<Field>, TokenStream> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields.named.iter().cloned().collect()),
            Fields::Unnamed(_) | Fields::Unit => Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive only supports structs with named fields",
            )
            .to_compile_error()),
        },
        _ => Err(syn::Error::new_spanned(&input.ident, "Record derive only supports structs")
            .to_compile_error()),
    }
}

fn parse_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            }

            let slot = if meta.path.is_ident("label") {
                &mut options.label
            } else if meta.path.is_ident("rename") {
                &mut options.rename
            } else {
                return Err(meta.error("Expected `label = \"...\"`, `rename = \"...\"` or `skip`"));
            };

            if slot.is_some() {
                return Err(meta.error("Duplicate record option"));
            }
            *slot = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        })?;
    }

    Ok(options)
}

fn mapped_fields(fields: Vec<Field>) -> Result<Vec<MappedField>, TokenStream> {
    let mut seen = FxHashSet::default();
    let mut mapped = Vec::with_capacity(fields.len());

    for field in fields {
        let options = parse_options(&field).map_err(|err| err.to_compile_error())?;
        if options.skip {
            continue;
        }
        let Some(ident) = field.ident else {
            return Err(syn::Error::new_spanned(&field.ty, "Record derive only supports named fields")
                .to_compile_error());
        };

        let identifier = options.rename.unwrap_or_else(|| {
            let name = ident.to_string();
            LitStr::new(name.trim_start_matches("r#"), ident.span())
        });
        if !seen.insert(identifier.value()) {
            return Err(syn::Error::new_spanned(
                &identifier,
                format!("Identifier `{}` is mapped by more than one field", identifier.value()),
            )
            .to_compile_error());
        }

        mapped.push(MappedField { ident, ty: field.ty, identifier, label: options.label });
    }

    Ok(mapped)
}

fn accessor_arms(fields: &[MappedField]) -> impl Iterator<Item = TokenStream> + '_ {
    fields.iter().map(|f| {
        let MappedField { ident, ty, identifier, .. } = f;
        quote! {
            #identifier => ::core::option::Option::Some(::rowmap::Accessor::field::<#ty>(
                |record: &Self| &record.#ident,
                |record: &mut Self| &mut record.#ident,
            )),
        }
    })
}

fn field_infos(fields: &[MappedField]) -> impl Iterator<Item = TokenStream> + '_ {
    fields.iter().map(|f| {
        let identifier = &f.identifier;
        let label = f.label.as_ref().map_or_else(
            || quote! { ::core::option::Option::None },
            |label| quote! { ::core::option::Option::Some(#label) },
        );
        quote! { ::rowmap::FieldInfo::new(#identifier, #label) }
    })
}

/// Expands `#[derive(Record)]`.
pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match named_fields(&input).and_then(mapped_fields) {
        Ok(fields) => fields,
        Err(err) => return err,
    };
    let arms = accessor_arms(&fields);
    let infos = field_infos(&fields);

    quote! {
        #[automatically_derived]
        impl #impl_generics ::rowmap::Record for #name #ty_generics #where_clause {
            fn accessor(identifier: &str) -> ::core::option::Option<::rowmap::Accessor<Self>> {
                match identifier {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn fields() -> &'static [::rowmap::FieldInfo] {
                const FIELDS: &[::rowmap::FieldInfo] = &[#(#infos),*];
                FIELDS
            }
        }
    }
}
