use std::fmt::{Debug, Display};

/// A single attribute value of a feature row.
///
/// SQLite stores integers, reals, text, blobs and NULL; blobs other than the geometry
/// column are kept as raw bytes.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Blob(Vec<u8>),
	Bool(bool),
	Double(f64),
	Int(i64),
	Null,
	String(String),
}

impl GeoValue {
	/// Returns the string slice if this is a `GeoValue::String`.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			GeoValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			GeoValue::Double(v) => Some(*v),
			GeoValue::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, GeoValue::Null)
	}

	/// Name of the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			GeoValue::Blob(_) => "Blob",
			GeoValue::Bool(_) => "Bool",
			GeoValue::Double(_) => "Double",
			GeoValue::Int(_) => "Int",
			GeoValue::Null => "Null",
			GeoValue::String(_) => "String",
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Blob(v) => write!(f, "Blob({})", v.len()),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::Null => f.debug_tuple("Null").finish(),
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Blob(v) => write!(f, "<{} bytes>", v.len()),
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Int(v) => write!(f, "{v}"),
			GeoValue::Null => write!(f, "null"),
			GeoValue::String(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		GeoValue::Int(i64::from(value))
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}
