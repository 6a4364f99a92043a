use std::fmt;

/// Built-in scalar types that participate in numeric widening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
}

impl ScalarKind {
    pub fn parse(name: &str) -> Option<ScalarKind> {
        Some(match name {
            "bool" => ScalarKind::Bool,
            "char" => ScalarKind::Char,
            "i8" => ScalarKind::I8,
            "i16" => ScalarKind::I16,
            "i32" => ScalarKind::I32,
            "i64" => ScalarKind::I64,
            "i128" => ScalarKind::I128,
            "u8" => ScalarKind::U8,
            "u16" => ScalarKind::U16,
            "u32" => ScalarKind::U32,
            "u64" => ScalarKind::U64,
            "u128" => ScalarKind::U128,
            "f32" => ScalarKind::F32,
            "f64" => ScalarKind::F64,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Char => "char",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }

    /// Lossless widening, mirroring the standard library's `From` impls
    /// between numeric types. Bool and char never widen.
    pub fn widens_to(self, target: ScalarKind) -> bool {
        if self == target {
            return false;
        }
        match (self.numeric_class(), target.numeric_class()) {
            (Some(NumericClass::Signed(a)), Some(NumericClass::Signed(b))) => a < b,
            (Some(NumericClass::Unsigned(a)), Some(NumericClass::Unsigned(b))) => a < b,
            // Unsigned fits in any strictly wider signed type.
            (Some(NumericClass::Unsigned(a)), Some(NumericClass::Signed(b))) => a < b,
            // Integers fit in a float whose mantissa covers them.
            (Some(NumericClass::Signed(a)), Some(NumericClass::Float(b)))
            | (Some(NumericClass::Unsigned(a)), Some(NumericClass::Float(b))) => {
                a <= if b == 32 { 16 } else { 32 }
            }
            (Some(NumericClass::Float(a)), Some(NumericClass::Float(b))) => a < b,
            _ => false,
        }
    }

    fn numeric_class(self) -> Option<NumericClass> {
        Some(match self {
            ScalarKind::I8 => NumericClass::Signed(8),
            ScalarKind::I16 => NumericClass::Signed(16),
            ScalarKind::I32 => NumericClass::Signed(32),
            ScalarKind::I64 => NumericClass::Signed(64),
            ScalarKind::I128 => NumericClass::Signed(128),
            ScalarKind::U8 => NumericClass::Unsigned(8),
            ScalarKind::U16 => NumericClass::Unsigned(16),
            ScalarKind::U32 => NumericClass::Unsigned(32),
            ScalarKind::U64 => NumericClass::Unsigned(64),
            ScalarKind::U128 => NumericClass::Unsigned(128),
            ScalarKind::F32 => NumericClass::Float(32),
            ScalarKind::F64 => NumericClass::Float(64),
            ScalarKind::Bool | ScalarKind::Char => return None,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum NumericClass {
    Signed(u16),
    Unsigned(u16),
    Float(u16),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
