//! `#[derive(Field)]` expansion.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{
  parse_quote, Attribute, Data, DeriveInput, Error, Fields, GenericArgument, Generics, Ident, Lit, LitStr, Meta, NestedMeta, Path,
  PathArguments, Type,
};

/// Everything needed to implement `Field` for a struct.
#[derive(Debug)]
pub struct FieldDerive {
  ident: Ident,
  generics: Generics,
  // struct field holding the Option<Data>
  value: Ident,
  data: Type,
  required: Option<LitStr>,
  validate: Option<Path>,
  // path to the erasure crate, `::erasure` unless renamed
  krate: Path,
}

/// Keys read from the struct’s #[field(…)] attributes.
#[derive(Default)]
struct StructAttrs {
  required: Option<LitStr>,
  validate: Option<Path>,
  krate: Option<Path>,
}

impl FieldDerive {
  pub fn from_input(input: DeriveInput) -> syn::Result<Self> {
    let StructAttrs {
      required,
      validate,
      krate,
    } = struct_attrs(&input.attrs)?;

    let fields = match input.data {
      Data::Struct(data) => match data.fields {
        Fields::Named(fields) => fields.named,
        fields => {
          return Err(Error::new_spanned(
            fields,
            "#[derive(Field)] requires named fields",
          ))
        }
      },
      Data::Enum(data) => {
        return Err(Error::new_spanned(
          data.enum_token,
          "#[derive(Field)] is only supported on structs",
        ))
      }
      Data::Union(data) => {
        return Err(Error::new_spanned(
          data.union_token,
          "#[derive(Field)] is only supported on structs",
        ))
      }
    };

    // a field marked #[field(value)] wins over a field named `value`
    let mut marked = None;
    for field in &fields {
      if is_marked_value(&field.attrs)? {
        if marked.is_some() {
          return Err(Error::new_spanned(
            field,
            "only one field can be marked with #[field(value)]",
          ));
        }

        marked = Some(field);
      }
    }

    let value_field = marked
      .or_else(|| {
        fields
          .iter()
          .find(|field| field.ident.as_ref().map_or(false, |ident| ident == "value"))
      })
      .ok_or_else(|| {
        Error::new_spanned(
          &input.ident,
          "no value field; add a `value` field or mark one with #[field(value)]",
        )
      })?;

    let value = value_field
      .ident
      .clone()
      .ok_or_else(|| Error::new_spanned(value_field, "value field must be named"))?;
    let data = option_inner(&value_field.ty)?.clone();

    Ok(FieldDerive {
      ident: input.ident,
      generics: input.generics,
      value,
      data,
      required,
      validate,
      krate: krate.unwrap_or_else(|| parse_quote!(::erasure)),
    })
  }
}

impl ToTokens for FieldDerive {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let FieldDerive {
      ident,
      generics,
      value,
      data,
      required,
      validate,
      krate,
    } = self;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let required_check = required.as_ref().map(|message| {
      quote! {
        if self.#value.is_none() {
          return #krate::ValidationOutcome::Invalid(::std::string::String::from(#message));
        }
      }
    });

    let outcome = match validate {
      Some(path) => quote! { #path(self) },
      None => quote! { #krate::ValidationOutcome::Valid },
    };

    let q = quote! {
      impl #impl_generics #krate::Field for #ident #ty_generics #where_clause {
        type Data = #data;

        fn value(&self) -> ::std::option::Option<&Self::Data> {
          self.#value.as_ref()
        }

        fn set_value(&mut self, value: ::std::option::Option<Self::Data>) {
          self.#value = value;
        }

        fn validate(&self) -> #krate::ValidationOutcome {
          #required_check
          #outcome
        }
      }
    };

    q.to_tokens(tokens);
  }
}

fn struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
  let mut struct_attrs = StructAttrs::default();

  for nested in field_attrs(attrs)? {
    match nested {
      NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("required") => {
        struct_attrs.required = Some(lit_str(nv.lit)?);
      }

      NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("validate") => {
        struct_attrs.validate = Some(lit_str(nv.lit)?.parse()?);
      }

      NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("crate") => {
        struct_attrs.krate = Some(lit_str(nv.lit)?.parse()?);
      }

      nested => {
        return Err(Error::new_spanned(
          nested,
          "unknown attribute; expected `required`, `validate` or `crate`",
        ))
      }
    }
  }

  Ok(struct_attrs)
}

/// Whether a struct field carries #[field(value)].
fn is_marked_value(attrs: &[Attribute]) -> syn::Result<bool> {
  let mut marked = false;

  for nested in field_attrs(attrs)? {
    match nested {
      NestedMeta::Meta(Meta::Path(path)) if path.is_ident("value") => marked = true,
      nested => {
        return Err(Error::new_spanned(
          nested,
          "unknown attribute; expected `value`",
        ))
      }
    }
  }

  Ok(marked)
}

/// Flatten the content of all the #[field(…)] attributes.
fn field_attrs(attrs: &[Attribute]) -> syn::Result<Vec<NestedMeta>> {
  let mut nested = Vec::new();

  for attr in attrs.iter().filter(|attr| attr.path.is_ident("field")) {
    match attr.parse_meta()? {
      Meta::List(list) => nested.extend(list.nested),
      meta => return Err(Error::new_spanned(meta, "expected #[field(…)]")),
    }
  }

  Ok(nested)
}

fn lit_str(lit: Lit) -> syn::Result<LitStr> {
  match lit {
    Lit::Str(s) => Ok(s),
    lit => Err(Error::new_spanned(lit, "expected a string literal")),
  }
}

/// Extract `T` out of `Option<T>`.
fn option_inner(ty: &Type) -> syn::Result<&Type> {
  if let Type::Path(ty_path) = ty {
    if ty_path.qself.is_none() {
      if let Some(segment) = ty_path.path.segments.last() {
        if segment.ident == "Option" {
          if let PathArguments::AngleBracketed(args) = &segment.arguments {
            if let Some(GenericArgument::Type(inner)) = args.args.first() {
              if args.args.len() == 1 {
                return Ok(inner);
              }
            }
          }
        }
      }
    }
  }

  Err(Error::new_spanned(ty, "value field must be an `Option<_>`"))
}

#[cfg(test)]
mod test {
  use super::*;

  fn derive(input: DeriveInput) -> syn::Result<FieldDerive> {
    FieldDerive::from_input(input)
  }

  fn err(input: DeriveInput) -> String {
    derive(input).unwrap_err().to_string()
  }

  #[test]
  fn value_named_field() {
    let derive = derive(parse_quote! {
      struct TextField {
        label: &'static str,
        value: Option<String>,
      }
    })
    .unwrap();

    let data: Type = parse_quote!(String);

    assert_eq!(derive.value, "value");
    assert_eq!(derive.data, data);
    assert!(derive.required.is_none());
    assert!(derive.validate.is_none());
  }

  #[test]
  fn marked_field_wins() {
    let derive = derive(parse_quote! {
      struct DatePicker {
        value: Option<u8>,
        #[field(value)]
        date: std::option::Option<(u16, u8, u8)>,
      }
    })
    .unwrap();

    let data: Type = parse_quote!((u16, u8, u8));

    assert_eq!(derive.value, "date");
    assert_eq!(derive.data, data);
  }

  #[test]
  fn struct_attributes() {
    let derive = derive(parse_quote! {
      #[field(required = "name is required")]
      #[field(validate = "checks::not_blank")]
      struct Name {
        value: Option<String>,
      }
    })
    .unwrap();

    let validate: Path = parse_quote!(checks::not_blank);

    assert_eq!(derive.required.unwrap().value(), "name is required");
    assert_eq!(derive.validate, Some(validate));
  }

  #[test]
  fn expansion() {
    let derive = derive(parse_quote! {
      #[field(required = "required")]
      struct Name<T> where T: Clone {
        value: Option<T>,
      }
    })
    .unwrap();

    let expected = quote! {
      impl<T> ::erasure::Field for Name<T> where T: Clone {
        type Data = T;

        fn value(&self) -> ::std::option::Option<&Self::Data> {
          self.value.as_ref()
        }

        fn set_value(&mut self, value: ::std::option::Option<Self::Data>) {
          self.value = value;
        }

        fn validate(&self) -> ::erasure::ValidationOutcome {
          if self.value.is_none() {
            return ::erasure::ValidationOutcome::Invalid(::std::string::String::from("required"));
          }
          ::erasure::ValidationOutcome::Valid
        }
      }
    };

    assert_eq!(derive.to_token_stream().to_string(), expected.to_string());
  }

  #[test]
  fn renamed_crate() {
    let derive = derive(parse_quote! {
      #[field(crate = "::forms::erasure")]
      struct Name {
        value: Option<String>,
      }
    })
    .unwrap();

    let expected = quote! {
      impl ::forms::erasure::Field for Name {
        type Data = String;

        fn value(&self) -> ::std::option::Option<&Self::Data> {
          self.value.as_ref()
        }

        fn set_value(&mut self, value: ::std::option::Option<Self::Data>) {
          self.value = value;
        }

        fn validate(&self) -> ::forms::erasure::ValidationOutcome {
          ::forms::erasure::ValidationOutcome::Valid
        }
      }
    };

    assert_eq!(derive.to_token_stream().to_string(), expected.to_string());
  }

  #[test]
  fn rejects_non_structs() {
    assert_eq!(
      err(parse_quote! { enum Choice { A, B } }),
      "#[derive(Field)] is only supported on structs"
    );
    assert_eq!(
      err(parse_quote! { union Bits { a: u32, b: f32 } }),
      "#[derive(Field)] is only supported on structs"
    );
    assert_eq!(
      err(parse_quote! { struct Tuple(Option<u8>); }),
      "#[derive(Field)] requires named fields"
    );
  }

  #[test]
  fn rejects_missing_or_bad_value_field() {
    assert_eq!(
      err(parse_quote! { struct Empty { label: String } }),
      "no value field; add a `value` field or mark one with #[field(value)]"
    );
    assert_eq!(
      err(parse_quote! { struct Bare { value: String } }),
      "value field must be an `Option<_>`"
    );
    assert_eq!(
      err(parse_quote! {
        struct Twice {
          #[field(value)]
          a: Option<u8>,
          #[field(value)]
          b: Option<u8>,
        }
      }),
      "only one field can be marked with #[field(value)]"
    );
  }

  #[test]
  fn rejects_bad_attributes() {
    assert_eq!(
      err(parse_quote! {
        #[field(optional = "yes")]
        struct F { value: Option<u8> }
      }),
      "unknown attribute; expected `required`, `validate` or `crate`"
    );
    assert_eq!(
      err(parse_quote! {
        #[field(required = 3)]
        struct F { value: Option<u8> }
      }),
      "expected a string literal"
    );
    assert_eq!(
      err(parse_quote! {
        #[field]
        struct F { value: Option<u8> }
      }),
      "expected #[field(…)]"
    );
    assert_eq!(
      err(parse_quote! {
        struct F {
          #[field(hidden)]
          value: Option<u8>,
        }
      }),
      "unknown attribute; expected `value`"
    );
  }
}
