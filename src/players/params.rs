use super::ledger::Ledger;
use crate::{Error, Metric, MATURITY, MAX_MEMORY, RATIONALITY, SAMPLES};
use serde::{Deserialize, Serialize};

/// Everything a calibrating policy has learned or been configured with,
/// in one serializable bundle. Restoring a bundle into a fresh agent
/// reproduces the policy exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// fold below this metric
    pub b1: Metric,
    /// raise at or above this metric
    pub b2: Metric,
    pub adaptive: bool,
    pub age: usize,
    pub maturity: usize,
    pub max_memory: usize,
    pub rationality: f32,
    pub samples: usize,
    pub calls: Ledger,
    pub raises: Ledger,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            b1: 0.0,
            b2: 0.0,
            adaptive: true,
            age: 0,
            maturity: MATURITY,
            max_memory: MAX_MEMORY,
            rationality: RATIONALITY,
            samples: SAMPLES,
            calls: Ledger::default(),
            raises: Ledger::default(),
        }
    }
}

impl Parameters {
    fn fields(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => unreachable!("parameters serialize to an object"),
        }
    }

    pub fn get(&self, name: &str) -> Result<serde_json::Value, Error> {
        self.fields()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Parameter(format!("no such parameter: {}", name)))
    }

    pub fn set(&mut self, name: &str, value: serde_json::Value) -> Result<(), Error> {
        let mut map = self.fields();
        if !map.contains_key(name) {
            return Err(Error::Parameter(format!("no such parameter: {}", name)));
        }
        map.insert(name.to_string(), value);
        *self = serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| Error::Parameter(format!("{}: {}", name, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn json_roundtrip_is_lossless() {
        let mut params = Parameters::default();
        let mut rng = SmallRng::seed_from_u64(0);
        params.b1 = -0.25;
        params.b2 = 0.125;
        params.calls.log(&[0.5, -0.5], 12, 100, &mut rng);
        params.raises.log(&[0.75], -7, 100, &mut rng);
        let json = serde_json::to_string(&params).unwrap();
        let back: Parameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn named_access_reads_and_writes() {
        let mut params = Parameters::default();
        params.set("b1", serde_json::json!(-0.5)).unwrap();
        assert_eq!(params.b1, -0.5);
        assert_eq!(params.get("b1").unwrap(), serde_json::json!(-0.5));
    }

    #[test]
    fn unknown_name_is_parameter_error() {
        let mut params = Parameters::default();
        assert!(matches!(params.get("b3"), Err(Error::Parameter(_))));
        assert!(matches!(
            params.set("b3", serde_json::json!(1)),
            Err(Error::Parameter(_))
        ));
    }

    #[test]
    fn malformed_value_is_parameter_error() {
        let mut params = Parameters::default();
        assert!(matches!(
            params.set("maturity", serde_json::json!("soon")),
            Err(Error::Parameter(_))
        ));
    }
}
