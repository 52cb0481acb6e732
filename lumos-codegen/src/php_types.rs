//! Mapping from relational column types to PHP doc types.

use lumos_config::{Column, ColumnType};

/// Map a column type to the PHP type named in `@property` docblocks.
pub fn php_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer | ColumnType::BigInt => "int",
        ColumnType::Float => "float",
        // decimals are cast to string to preserve precision
        ColumnType::Decimal => "string",
        ColumnType::Boolean => "bool",
        ColumnType::String
        | ColumnType::Text
        | ColumnType::Binary
        | ColumnType::Uuid
        | ColumnType::Enum => "string",
        ColumnType::Date | ColumnType::DateTime | ColumnType::Timestamp => "\\Carbon\\Carbon",
        ColumnType::Json => "array",
    }
}

/// Full property type for a column, with `|null` appended when nullable.
pub fn php_property_type(column: &Column) -> String {
    let base = php_type(column.ty);
    if column.nullable {
        format!("{}|null", base)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(ty: ColumnType, nullable: bool) -> Column {
        Column {
            name: "c".to_string(),
            ty,
            nullable,
        }
    }

    #[test]
    fn test_scalar_mappings() {
        assert_eq!(php_type(ColumnType::Integer), "int");
        assert_eq!(php_type(ColumnType::BigInt), "int");
        assert_eq!(php_type(ColumnType::Float), "float");
        assert_eq!(php_type(ColumnType::Decimal), "string");
        assert_eq!(php_type(ColumnType::Boolean), "bool");
        assert_eq!(php_type(ColumnType::Uuid), "string");
        assert_eq!(php_type(ColumnType::Json), "array");
    }

    #[test]
    fn test_temporal_types_map_to_carbon() {
        assert_eq!(php_type(ColumnType::Date), "\\Carbon\\Carbon");
        assert_eq!(php_type(ColumnType::DateTime), "\\Carbon\\Carbon");
        assert_eq!(php_type(ColumnType::Timestamp), "\\Carbon\\Carbon");
    }

    #[test]
    fn test_nullable_appends_null() {
        assert_eq!(php_property_type(&column(ColumnType::Integer, false)), "int");
        assert_eq!(
            php_property_type(&column(ColumnType::Timestamp, true)),
            "\\Carbon\\Carbon|null"
        );
    }
}
