use crate::casing::camel_case;
use crate::route::model::{Discriminator, SchemaShape};
use serde::Serialize;

/// Types that have no validation schema of their own.
const NON_SCHEMA_TYPES: [&str; 6] = ["void", "any", "null", "undefined", "object", "string"];

/// Validation schema for a request or response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDescriptor {
    /// Every schema name referenced by `expression`.
    pub list: Vec<String>,
    pub expression: Option<String>,
}

/// The value a discriminator dispatch matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSubject {
    Payload,
    Response,
}

impl SchemaSubject {
    fn binding(&self) -> &'static str {
        match self {
            SchemaSubject::Payload => "payload",
            SchemaSubject::Response => "response",
        }
    }
}

/// Whether a type can be validated with a generated schema.
///
/// Matches case-insensitively anywhere in the type, so `string[]` and
/// `Record<string, any>` are rejected too.
pub fn is_schema_type(ty: Option<&str>) -> bool {
    match ty {
        Some(ty) if !ty.is_empty() => {
            let lower = ty.to_lowercase();
            !NON_SCHEMA_TYPES.iter().any(|t| lower.contains(t))
        }
        _ => false,
    }
}

/// `#/components/schemas/Cat` -> `catDtoSchema`
pub fn mapping_schema_name(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or_default();
    format!("{}DtoSchema", camel_case(last))
}

fn dispatch_expression(subject: SchemaSubject, discriminator: &Discriminator) -> String {
    let cases: Vec<String> = discriminator
        .mapping
        .iter()
        .map(|(tag, reference)| {
            format!(
                "with({{ {}: \"{}\" }}, () => {})",
                discriminator.property_name,
                tag,
                mapping_schema_name(reference)
            )
        })
        .collect();
    format!(
        "match({}).{}.otherwise(()=>null)",
        subject.binding(),
        cases.join(".")
    )
}

/// Build the schema descriptor of a body typed `dto_name` with the given shape.
pub fn describe(
    dto_name: Option<&str>,
    shape: Option<&SchemaShape>,
    subject: SchemaSubject,
) -> SchemaDescriptor {
    if !is_schema_type(dto_name) {
        return SchemaDescriptor::default();
    }
    let schema_name = format!("{}Schema", camel_case(dto_name.unwrap_or_default()));

    let is_list = shape.is_some_and(|s| s.is_array);
    let discriminator = shape.and_then(|s| s.discriminator.as_ref());

    let list = match discriminator {
        Some(d) => d
            .mapping
            .iter()
            .map(|(_, reference)| mapping_schema_name(reference))
            .collect(),
        None => vec![schema_name.clone()],
    };

    let expression = if is_list {
        format!("z.array({schema_name})")
    } else if let Some(d) = discriminator {
        dispatch_expression(subject, d)
    } else {
        schema_name
    };

    SchemaDescriptor {
        list,
        expression: Some(expression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet_discriminator() -> Discriminator {
        Discriminator {
            property_name: "type".to_string(),
            mapping: vec![
                ("cat".to_string(), "#/Cat".to_string()),
                ("dog".to_string(), "#/Dog".to_string()),
            ],
        }
    }

    #[test]
    fn non_schema_types_are_rejected() {
        assert!(!is_schema_type(None));
        assert!(!is_schema_type(Some("")));
        assert!(!is_schema_type(Some("void")));
        assert!(!is_schema_type(Some("VOID")));
        assert!(!is_schema_type(Some("string[]")));
        assert!(!is_schema_type(Some("Record<string, any>")));
        assert!(is_schema_type(Some("UserDto")));
        assert!(is_schema_type(Some("number")));
    }

    #[test]
    fn plain_reference() {
        let d = describe(Some("UserDto"), Some(&SchemaShape::default()), SchemaSubject::Response);
        assert_eq!(d.expression.as_deref(), Some("userDtoSchema"));
        assert_eq!(d.list, vec!["userDtoSchema"]);
    }

    #[test]
    fn array_wraps_item_schema() {
        let shape = SchemaShape {
            is_array: true,
            discriminator: None,
        };
        let d = describe(Some("UserDto[]"), Some(&shape), SchemaSubject::Response);
        assert_eq!(d.expression.as_deref(), Some("z.array(userDtoSchema)"));
        assert_eq!(d.list, vec!["userDtoSchema"]);
    }

    #[test]
    fn discriminator_dispatches_per_mapping_entry() {
        let shape = SchemaShape {
            is_array: false,
            discriminator: Some(pet_discriminator()),
        };
        let d = describe(Some("PetDto"), Some(&shape), SchemaSubject::Response);
        assert_eq!(d.list, vec!["catDtoSchema", "dogDtoSchema"]);
        assert_eq!(
            d.expression.as_deref(),
            Some(
                "match(response).with({ type: \"cat\" }, () => catDtoSchema)\
                 .with({ type: \"dog\" }, () => dogDtoSchema).otherwise(()=>null)"
            )
        );

        let d = describe(Some("PetDto"), Some(&shape), SchemaSubject::Payload);
        assert!(d.expression.unwrap().starts_with("match(payload)."));
    }

    #[test]
    fn void_has_no_schema() {
        let d = describe(Some("void"), None, SchemaSubject::Response);
        assert_eq!(d.expression, None);
        assert!(d.list.is_empty());
    }
}
