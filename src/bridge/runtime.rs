use indexmap::IndexMap;
use log::debug;

use super::adapter::{
    dataset_to_feature_major, dataset_to_observation_major, feature_major_to_dataset,
    observation_major_to_dataset,
};
use super::value::BridgeValue;
use super::ConversionError;

/// Named values bound for the duration of one request
pub type Scope = IndexMap<String, BridgeValue>;

/// A call the runtime can execute: consumes the request scope, returns the new one.
pub type CallHandler = Box<dyn Fn(Scope) -> Result<Scope, ConversionError>>;

/// Call that turns observation-major records into feature-major ones
pub const CALL_TO_FEATURE_MAJOR: &str = "to_feature_major";
/// Call that turns feature-major records into observation-major ones
pub const CALL_TO_OBSERVATION_MAJOR: &str = "to_observation_major";

/// Conversion direction across the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Observation-major (AnnData-like) to feature-major (SingleCellExperiment-like)
    ToFeatureMajor,
    /// Feature-major to observation-major
    ToObservationMajor,
}

impl Direction {
    /// Name of the runtime call implementing this direction
    pub fn call_name(&self) -> &'static str {
        match self {
            Direction::ToFeatureMajor => CALL_TO_FEATURE_MAJOR,
            Direction::ToObservationMajor => CALL_TO_OBSERVATION_MAJOR,
        }
    }

    /// The opposite direction
    pub fn reverse(&self) -> Self {
        match self {
            Direction::ToFeatureMajor => Direction::ToObservationMajor,
            Direction::ToObservationMajor => Direction::ToFeatureMajor,
        }
    }
}

/// One exchange with a runtime: named inputs, the call to run, and the
/// names to return.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeRequest {
    /// Call name
    pub call: String,
    /// Values bound before the call runs
    pub inputs: IndexMap<String, BridgeValue>,
    /// Names to return after the call
    pub outputs: Vec<String>,
}

impl BridgeRequest {
    /// Request with no inputs or outputs yet.
    pub fn new(call: impl Into<String>) -> Self {
        Self {
            call: call.into(),
            inputs: IndexMap::new(),
            outputs: Vec::new(),
        }
    }

    /// Bind an input value.
    pub fn with_input(mut self, name: impl Into<String>, value: BridgeValue) -> Self {
        self.inputs.insert(name.into(), value);
        self
    }

    /// Request an output by name.
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(name.into());
        self
    }
}

/// Values returned by a runtime, keyed by requested output name
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeResponse {
    /// Requested outputs, in request order
    pub outputs: IndexMap<String, BridgeValue>,
}

impl BridgeResponse {
    /// Remove and return one output.
    pub fn take(&mut self, name: &str) -> Result<BridgeValue, ConversionError> {
        self.outputs
            .shift_remove(name)
            .ok_or_else(|| ConversionError::UnknownOutput(name.to_string()))
    }
}

/// Executes bridge requests.
///
/// A runtime keeps no variables between requests: everything a call needs
/// arrives in the request and everything it produces leaves in the response.
pub trait Runtime {
    /// Runtime name used in messages
    fn name(&self) -> &str;

    /// Whether requests can be executed
    fn is_available(&self) -> bool;

    /// Execute one request.
    fn execute(&self, request: BridgeRequest) -> Result<BridgeResponse, ConversionError>;
}

/// Runtime that executes calls in-process.
///
/// Comes with the two conversion calls registered; more can be added with
/// [`InProcessRuntime::with_call`].
pub struct InProcessRuntime {
    calls: IndexMap<String, CallHandler>,
}

impl InProcessRuntime {
    /// Runtime with the conversion calls registered
    pub fn new() -> Self {
        let runtime = Self {
            calls: IndexMap::new(),
        };
        runtime
            .with_call(CALL_TO_FEATURE_MAJOR, |scope| {
                convert_scope(scope, Direction::ToFeatureMajor)
            })
            .with_call(CALL_TO_OBSERVATION_MAJOR, |scope| {
                convert_scope(scope, Direction::ToObservationMajor)
            })
    }

    /// Register (or replace) a call.
    pub fn with_call<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Scope) -> Result<Scope, ConversionError> + 'static,
    {
        self.calls.insert(name.into(), Box::new(handler));
        self
    }

    /// Registered call names
    pub fn call_names(&self) -> impl Iterator<Item = &str> {
        self.calls.keys().map(String::as_str)
    }
}

impl Default for InProcessRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for InProcessRuntime {
    fn name(&self) -> &str {
        "in-process"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn execute(&self, request: BridgeRequest) -> Result<BridgeResponse, ConversionError> {
        let handler = self
            .calls
            .get(&request.call)
            .ok_or_else(|| ConversionError::UnknownCall(request.call.clone()))?;

        debug!(
            "Executing '{}' with inputs {:?}",
            request.call,
            request.inputs.keys().collect::<Vec<_>>()
        );
        let mut scope = handler(request.inputs)?;

        let mut outputs = IndexMap::with_capacity(request.outputs.len());
        for name in request.outputs {
            let value = scope
                .shift_remove(&name)
                .ok_or_else(|| ConversionError::UnknownOutput(name.clone()))?;
            outputs.insert(name, value);
        }
        Ok(BridgeResponse { outputs })
    }
}

/// Convert every bound value, keeping its name.
fn convert_scope(scope: Scope, direction: Direction) -> Result<Scope, ConversionError> {
    scope
        .into_iter()
        .map(|(name, value)| {
            let converted = match direction {
                Direction::ToFeatureMajor => {
                    dataset_to_feature_major(observation_major_to_dataset(value)?)
                }
                Direction::ToObservationMajor => {
                    dataset_to_observation_major(feature_major_to_dataset(value)?)
                }
            };
            Ok((name, converted))
        })
        .collect()
}
