use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, FieldsNamed, GenericArgument, Ident, PathArguments, Type, Variant};

struct VariantMeta<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    /// Fields other than `source` and `context`; such variants get no `From` impl.
    has_payload: bool,
    cfg_attrs: Vec<Attribute>,
}

impl VariantMeta<'_> {
    fn convertible(&self) -> bool {
        self.source.is_some() && self.has_context && !self.has_payload && self.ident != "Internal"
    }
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("rowmap_error can only be applied to enums"); };
    };

    let variants: Vec<VariantMeta<'_>> = match data.variants.iter().map(parse_variant).collect() {
        Ok(v) => v,
        Err(err) => return err,
    };
    if let Some(missing) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
        return syn::Error::new_spanned(
            missing.ident,
            "rowmap_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error();
    }

    let derived = derived_trait_names(&input.attrs);
    let mut derive_tokens = Vec::new();
    if !derived.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    let context_impl = context_trait_tokens(name, &trait_name, &variants);
    let from_impls = variants.iter().filter(|v| v.convertible()).map(|v| from_tokens(name, &trait_name, v));
    let internal_impls = internal_tokens(name, &variants);
    let kind_impl = kind_tokens(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        #context_impl
        #(#from_impls)*
        #internal_impls
        #kind_impl

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn parse_variant(v: &Variant) -> Result<VariantMeta<'_>, TokenStream> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            &v.ident,
            "rowmap_error requires named fields for source/context handling",
        )
        .to_compile_error());
    };

    let has_context = context_field(fields)?;
    let source = fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == "source")
            || has_attr(&field.attrs, "source")
            || has_attr(&field.attrs, "from")
    });
    let source = source.and_then(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)));
    let has_payload = fields.named.iter().filter_map(|f| f.ident.as_ref()).any(|ident| {
        ident != "context" && source.is_none_or(|(source_ident, _)| ident != source_ident)
    });

    Ok(VariantMeta {
        ident: &v.ident,
        source,
        has_context,
        has_payload,
        cfg_attrs: v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect(),
    })
}

fn context_field(fields: &FieldsNamed) -> Result<bool, TokenStream> {
    let Some(field) =
        fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|ident| ident == "context"))
    else {
        return Ok(false);
    };
    if is_context_type(&field.ty) {
        Ok(true)
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>")
            .to_compile_error())
    }
}

fn context_trait_tokens(name: &Ident, trait_name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #arms )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn from_tokens(name: &Ident, trait_name: &Ident, v: &VariantMeta<'_>) -> TokenStream {
    let Some((source_field, source_ty)) = v.source else {
        return quote! {};
    };
    let v_ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self { Self::#v_ident { #source_field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for std::result::Result<T, #source_ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#v_ident { #source_field, context: Some(context.into()) })
            }
        }
    }
}

fn internal_tokens(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal") else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn kind_tokens(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let arms = variants.iter().map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        let text = ident.to_string();
        quote! { #(#cfg_attrs)* Self::#ident { .. } => #text, }
    });

    quote! {
        impl #name {
            /// Name of the variant, stable across message wording changes.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    #( #arms )*
                }
            }
        }
    }
}

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                traits.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

/// Last path segment of `ty` together with its angle-bracketed arguments.
fn last_segment(ty: &Type) -> Option<(&Ident, Option<&syn::AngleBracketedGenericArguments>)> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let args = match &segment.arguments {
        PathArguments::AngleBracketed(args) => Some(args),
        _ => None,
    };
    Some((&segment.ident, args))
}

/// Matches `Option<Cow<'static, str>>` by segment names.
fn is_context_type(ty: &Type) -> bool {
    let Some((option, Some(args))) = last_segment(ty) else {
        return false;
    };
    let Some(GenericArgument::Type(cow_ty)) = args.args.first() else {
        return false;
    };
    let Some((cow, Some(cow_args))) = last_segment(cow_ty) else {
        return false;
    };
    let mut cow_args = cow_args.args.iter();
    let (Some(GenericArgument::Lifetime(lt)), Some(GenericArgument::Type(str_ty))) =
        (cow_args.next(), cow_args.next())
    else {
        return false;
    };

    option == "Option"
        && cow == "Cow"
        && lt.ident == "static"
        && last_segment(str_ty).is_some_and(|(ident, _)| ident == "str")
}
