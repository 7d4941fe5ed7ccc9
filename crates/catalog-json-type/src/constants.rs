/// Marshal error codes.
///
/// ATTENTION: Only add new error codes at the end of the list !!!
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarshalErrorKind {
    MissingField = 0,
    InvalidEnumValue = 1,
    TypeMismatch = 2,
    UnknownRecordType = 3,
    UnknownField = 4,
}

impl MarshalErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidEnumValue => "INVALID_ENUM_VALUE",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::UnknownRecordType => "UNKNOWN_RECORD_TYPE",
            Self::UnknownField => "UNKNOWN_FIELD",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::MissingField => "Missing required field.",
            Self::InvalidEnumValue => "Not an enum value.",
            Self::TypeMismatch => "Unexpected value shape.",
            Self::UnknownRecordType => "Record type is not registered.",
            Self::UnknownField => "Field is not declared by the record.",
        }
    }

    pub fn errno(self) -> u8 {
        self as u8
    }
}
