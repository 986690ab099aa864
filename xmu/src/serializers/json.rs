//! JSON export of sampled curves and symbolic descriptions
//!
//! Symbolic expressions serialize as their canonical rendering; downstream
//! consumers treat them as display strings, not as a parseable format.

use crate::function::{Branch, XEquals, XmuFunction};
use crate::sampling::SampledCurve;
use crate::symbolic::Piecewise;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

impl Serialize for Branch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Branch::Ascending(pw) => serialize_envelope(serializer, "ascending", pw),
            Branch::Descending(pw) => serialize_envelope(serializer, "descending", pw),
            Branch::Plateau(lo, hi) => {
                let mut st = serializer.serialize_map(Some(3))?;
                st.serialize_entry("kind", "plateau")?;
                st.serialize_entry("from_x", &lo.to_string())?;
                st.serialize_entry("to_x", &hi.to_string())?;
                st.end()
            }
        }
    }
}

fn serialize_envelope<S>(serializer: S, kind: &str, pw: &Piecewise) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    #[derive(serde::Serialize)]
    struct PieceRepr {
        from_mu: f64,
        to_mu: f64,
        x: String,
    }

    let pieces: Vec<PieceRepr> = pw
        .pieces()
        .iter()
        .map(|piece| PieceRepr {
            from_mu: piece.lower,
            to_mu: piece.upper,
            x: piece.expr.to_string(),
        })
        .collect();

    let mut st = serializer.serialize_map(Some(2))?;
    st.serialize_entry("kind", kind)?;
    st.serialize_entry("pieces", &pieces)?;
    st.end()
}

impl Serialize for XEquals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("xequals", 2)?;
        st.serialize_field("branches", &self.branches)?;
        st.serialize_field("breakpoints", &self.breakpoints)?;
        st.end()
    }
}

impl Serialize for XmuFunction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(serde::Serialize)]
        struct UniverseRepr {
            lo: f64,
            hi: f64,
        }

        let mut st = serializer.serialize_struct("xmu_function", 3)?;
        st.serialize_field(
            "universe",
            &UniverseRepr {
                lo: self.universe().lo(),
                hi: self.universe().hi(),
            },
        )?;
        st.serialize_field("family", &self.family().to_string())?;
        st.serialize_field("xequals", &self.xequals())?;
        st.end()
    }
}

/// Serialize a sampled curve to pretty JSON
pub fn curve_to_json(curve: &SampledCurve) -> serde_json::Result<String> {
    serde_json::to_string_pretty(curve)
}

/// Serialize an XmuFunction's symbolic description to pretty JSON
pub fn function_to_json(function: &XmuFunction) -> serde_json::Result<String> {
    serde_json::to_string_pretty(function)
}
