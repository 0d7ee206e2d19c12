use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derive macro for mappable record shapes.
///
/// Implements `mapstruct::Mappable` and `mapstruct::Record` for the
/// annotated struct. Every field type must implement `Mappable`.
///
/// The struct must implement `Default`: nested records are built from it.
///
/// Field attributes:
/// - `#[map(readonly)]`: described, but the mapper never writes it.
/// - `#[map(skip)]`: not described at all; keeps its default when the record
///   is rebuilt from a value.
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct Order {
///     pub id: u64,
///     pub lines: Vec<Line>,
///
///     #[map(readonly)]
///     pub created_by: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(map))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record only supports structs",
            ))
        }
    };

    let mut descriptor_tokens = Vec::new();
    let mut to_record_tokens = Vec::new();
    let mut apply_tokens = Vec::new();

    for field in fields {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = field_name.to_string();
        let field_name_str = field_name_str.trim_start_matches("r#");
        let field_ty = &field.ty;

        // Parse #[map(...)] attribute.
        let mut readonly = false;
        let mut skip = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("map") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("readonly") {
                    readonly = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown map attribute (expected 'readonly' or 'skip')"))
                }
            })?;
        }

        if skip && readonly {
            return Err(syn::Error::new_spanned(
                field_name,
                "a field cannot be both 'skip' and 'readonly'",
            ));
        }
        if skip {
            continue;
        }

        let settable = !readonly;
        let descriptor = quote! {
            mapstruct::FieldDescriptor::new(
                #field_name_str,
                <#field_ty as mapstruct::Mappable>::kind(),
                #settable,
            )
        };

        to_record_tokens.push(quote! {
            __record.push(#descriptor, mapstruct::Mappable::to_value(&self.#field_name));
        });
        descriptor_tokens.push(descriptor);
        apply_tokens.push(quote! {
            #field_name_str => {
                if let Some(v) = <#field_ty as mapstruct::Mappable>::from_value(__entry.value) {
                    self.#field_name = v;
                }
            }
        });
    }

    let expanded = quote! {
        impl #impl_generics mapstruct::Mappable for #name #ty_generics #where_clause {
            fn kind() -> mapstruct::Kind {
                mapstruct::Kind::Record(mapstruct::RecordType::of::<Self>())
            }

            fn to_value(&self) -> mapstruct::Value {
                mapstruct::Value::Record(mapstruct::Record::to_record(self))
            }

            fn from_value(value: mapstruct::Value) -> Option<Self> {
                match value {
                    mapstruct::Value::Record(__record)
                        if __record.type_name == ::std::any::type_name::<Self>() =>
                    {
                        let mut __out = <Self as ::std::default::Default>::default();
                        mapstruct::Record::apply_record(&mut __out, __record);
                        Some(__out)
                    }
                    _ => None,
                }
            }
        }

        impl #impl_generics mapstruct::Record for #name #ty_generics #where_clause {
            fn shape() -> Vec<mapstruct::FieldDescriptor> {
                vec![
                    #(#descriptor_tokens),*
                ]
            }

            fn to_record(&self) -> mapstruct::RecordValue {
                let mut __record = mapstruct::RecordValue::new(::std::any::type_name::<Self>());
                #(#to_record_tokens)*
                __record
            }

            fn apply_record(&mut self, __record: mapstruct::RecordValue) {
                for __entry in __record.fields {
                    match __entry.descriptor.name {
                        #(#apply_tokens)*
                        _ => {}
                    }
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
