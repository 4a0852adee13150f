//! Fixed-shape resource vectors and matrices
//!
//! Shapes are validated once, at construction, so the analyses can index
//! freely afterwards. A [`SystemState`] bundles allocation, maximum demand and
//! available units for the Banker's safety check; a [`DetectionState`] bundles
//! allocation, outstanding requests and available units for matrix deadlock
//! detection.

use crate::core::error::{Error, Result};
use crate::core::types::{ProcessId, Quantity};
use serde::{Deserialize, Serialize};

/// Convert a signed quantity, rejecting negatives and values beyond `u32`
pub fn quantity_from_signed(value: i64) -> Result<Quantity> {
    Quantity::try_from(value).map_err(|_| Error::InvalidQuantity(value.to_string()))
}

/// Convert a JSON number, rejecting negatives, fractions and values beyond `u32`
///
/// Whole numbers written as floats (`1.0`) are accepted.
pub fn quantity_from_json(value: &serde_json::Number) -> Result<Quantity> {
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(Quantity::MAX)).contains(v))
            .map(|v| v as u64)
    });
    whole
        .and_then(|v| Quantity::try_from(v).ok())
        .ok_or_else(|| Error::InvalidQuantity(value.to_string()))
}

/// One non-negative quantity per resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceVector(Vec<Quantity>);

impl ResourceVector {
    pub fn new(values: Vec<Quantity>) -> Self {
        ResourceVector(values)
    }

    /// A vector of `len` zeros
    pub fn zeros(len: usize) -> Self {
        ResourceVector(vec![0; len])
    }

    pub fn from_signed(values: &[i64]) -> Result<Self> {
        values
            .iter()
            .map(|&v| quantity_from_signed(v))
            .collect::<Result<Vec<_>>>()
            .map(ResourceVector)
    }

    pub fn from_json(values: &[serde_json::Number]) -> Result<Self> {
        values
            .iter()
            .map(quantity_from_json)
            .collect::<Result<Vec<_>>>()
            .map(ResourceVector)
    }

    /// Number of resource types
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Quantity] {
        &self.0
    }

    /// First resource index where `self[r] > other[r]`, if any
    ///
    /// Both vectors must have the same length.
    pub fn first_excess_over(&self, other: &ResourceVector) -> Option<usize> {
        self.0.iter().zip(&other.0).position(|(a, b)| a > b)
    }

    /// `self[r] <= other[r]` for every resource type
    pub fn fits_within(&self, other: &ResourceVector) -> bool {
        self.first_excess_over(other).is_none()
    }

    /// Element-wise `self += other`
    pub fn add_assign(&mut self, other: &ResourceVector) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a = a.saturating_add(*b);
        }
    }

    /// Element-wise `self - other`, `None` if any entry would go negative
    pub fn checked_sub(&self, other: &ResourceVector) -> Option<ResourceVector> {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<Option<Vec<_>>>()
            .map(ResourceVector)
    }
}

impl From<Vec<Quantity>> for ResourceVector {
    fn from(values: Vec<Quantity>) -> Self {
        ResourceVector(values)
    }
}

/// A process-indexed matrix of resource vectors, all of the same width
///
/// Serialized as a plain array of rows; deserializing rejects ragged rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ResourceVector>", into = "Vec<ResourceVector>")]
pub struct ResourceMatrix {
    rows: Vec<ResourceVector>,
    resources: usize,
}

impl ResourceMatrix {
    /// Build a matrix, rejecting ragged rows
    ///
    /// An empty matrix has width 0 and is compatible with any resource count.
    pub fn new(rows: Vec<Vec<Quantity>>) -> Result<Self> {
        Self::from_vectors(rows.into_iter().map(ResourceVector).collect())
    }

    pub fn from_signed(rows: &[Vec<i64>]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| ResourceVector::from_signed(row))
            .collect::<Result<Vec<_>>>()?;
        Self::from_vectors(rows)
    }

    pub fn from_json(rows: &[Vec<serde_json::Number>]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| ResourceVector::from_json(row))
            .collect::<Result<Vec<_>>>()?;
        Self::from_vectors(rows)
    }

    fn from_vectors(rows: Vec<ResourceVector>) -> Result<Self> {
        let resources = rows.first().map(ResourceVector::len).unwrap_or(0);
        if let Some((p, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != resources) {
            return Err(Error::DimensionMismatch(format!(
                "row P{p} has {} columns, expected {resources}",
                row.len()
            )));
        }
        Ok(ResourceMatrix { rows, resources })
    }

    /// Number of processes (rows)
    pub fn processes(&self) -> usize {
        self.rows.len()
    }

    /// Number of resource types (columns)
    pub fn resources(&self) -> usize {
        self.resources
    }

    pub fn row(&self, process: ProcessId) -> Option<&ResourceVector> {
        self.rows.get(process)
    }

    pub fn rows(&self) -> &[ResourceVector] {
        &self.rows
    }

    fn row_mut(&mut self, process: ProcessId) -> Option<&mut ResourceVector> {
        self.rows.get_mut(process)
    }
}

impl TryFrom<Vec<ResourceVector>> for ResourceMatrix {
    type Error = Error;

    fn try_from(rows: Vec<ResourceVector>) -> Result<Self> {
        Self::from_vectors(rows)
    }
}

impl From<ResourceMatrix> for Vec<ResourceVector> {
    fn from(matrix: ResourceMatrix) -> Self {
        matrix.rows
    }
}

/// Check that `matrix` has `processes` rows of `resources` columns
fn check_shape(
    name: &str,
    matrix: &ResourceMatrix,
    processes: usize,
    resources: usize,
) -> Result<()> {
    if matrix.processes() != processes {
        return Err(Error::DimensionMismatch(format!(
            "{name} has {} rows, expected {processes}",
            matrix.processes()
        )));
    }
    if processes > 0 && matrix.resources() != resources {
        return Err(Error::DimensionMismatch(format!(
            "{name} has {} columns, expected {resources}",
            matrix.resources()
        )));
    }
    Ok(())
}

/// A validated snapshot for the Banker's safety check
///
/// Holds allocation and maximum demand (both P×R), the available vector
/// (length R) and the derived need matrix. Deserializing goes through
/// [`SystemState::new`]; a serialized `need` is ignored and re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SystemStateFields")]
pub struct SystemState {
    allocation: ResourceMatrix,
    max_demand: ResourceMatrix,
    available: ResourceVector,
    need: ResourceMatrix,
}

impl SystemState {
    /// Validate shapes and `max_demand >= allocation`, then derive need
    ///
    /// # Errors
    /// - [`Error::DimensionMismatch`] if the shapes disagree
    /// - [`Error::AllocationExceedsMaximum`] if a process holds more than its maximum
    pub fn new(
        allocation: ResourceMatrix,
        max_demand: ResourceMatrix,
        available: ResourceVector,
    ) -> Result<Self> {
        let processes = allocation.processes();
        let resources = available.len();
        check_shape("allocation", &allocation, processes, resources)?;
        check_shape("max demand", &max_demand, processes, resources)?;

        let mut need_rows = Vec::with_capacity(processes);
        for (p, (held, max)) in allocation.rows().iter().zip(max_demand.rows()).enumerate() {
            let need = max.checked_sub(held).ok_or_else(|| {
                let resource = held.first_excess_over(max).unwrap_or_default();
                Error::AllocationExceedsMaximum {
                    process: p,
                    resource,
                }
            })?;
            need_rows.push(need);
        }

        Ok(SystemState {
            allocation,
            max_demand,
            available,
            need: ResourceMatrix {
                rows: need_rows,
                resources,
            },
        })
    }

    /// Convenience constructor from plain rows
    pub fn from_rows(
        allocation: Vec<Vec<Quantity>>,
        max_demand: Vec<Vec<Quantity>>,
        available: Vec<Quantity>,
    ) -> Result<Self> {
        Self::new(
            ResourceMatrix::new(allocation)?,
            ResourceMatrix::new(max_demand)?,
            ResourceVector::new(available),
        )
    }

    pub fn processes(&self) -> usize {
        self.allocation.processes()
    }

    pub fn resources(&self) -> usize {
        self.available.len()
    }

    pub fn allocation(&self) -> &ResourceMatrix {
        &self.allocation
    }

    pub fn max_demand(&self) -> &ResourceMatrix {
        &self.max_demand
    }

    pub fn available(&self) -> &ResourceVector {
        &self.available
    }

    pub fn need(&self) -> &ResourceMatrix {
        &self.need
    }

    /// A copy of this state with `request` moved from available to `process`
    ///
    /// The caller has already checked `request <= need[process]` and
    /// `request <= available`; returns `None` otherwise.
    pub(crate) fn with_granted(
        &self,
        process: ProcessId,
        request: &ResourceVector,
    ) -> Option<Self> {
        let mut next = self.clone();
        next.available = self.available.checked_sub(request)?;
        let need = next.need.row(process)?.checked_sub(request)?;
        *next.need.row_mut(process)? = need;
        next.allocation.row_mut(process)?.add_assign(request);
        Some(next)
    }
}

#[derive(Deserialize)]
struct SystemStateFields {
    allocation: ResourceMatrix,
    #[serde(alias = "max")]
    max_demand: ResourceMatrix,
    available: ResourceVector,
}

impl TryFrom<SystemStateFields> for SystemState {
    type Error = Error;

    fn try_from(fields: SystemStateFields) -> Result<Self> {
        Self::new(fields.allocation, fields.max_demand, fields.available)
    }
}

/// A validated snapshot for matrix deadlock detection
///
/// `request[p]` is what process `p` is currently asking for, rather than its
/// remaining worst-case need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DetectionStateFields")]
pub struct DetectionState {
    allocation: ResourceMatrix,
    request: ResourceMatrix,
    available: ResourceVector,
}

impl DetectionState {
    /// Validate that allocation and request are P×R and available is length R
    pub fn new(
        allocation: ResourceMatrix,
        request: ResourceMatrix,
        available: ResourceVector,
    ) -> Result<Self> {
        let processes = allocation.processes();
        let resources = available.len();
        check_shape("allocation", &allocation, processes, resources)?;
        check_shape("request", &request, processes, resources)?;
        Ok(DetectionState {
            allocation,
            request,
            available,
        })
    }

    pub fn from_rows(
        allocation: Vec<Vec<Quantity>>,
        request: Vec<Vec<Quantity>>,
        available: Vec<Quantity>,
    ) -> Result<Self> {
        Self::new(
            ResourceMatrix::new(allocation)?,
            ResourceMatrix::new(request)?,
            ResourceVector::new(available),
        )
    }

    pub fn processes(&self) -> usize {
        self.allocation.processes()
    }

    pub fn allocation(&self) -> &ResourceMatrix {
        &self.allocation
    }

    pub fn request(&self) -> &ResourceMatrix {
        &self.request
    }

    pub fn available(&self) -> &ResourceVector {
        &self.available
    }
}

#[derive(Deserialize)]
struct DetectionStateFields {
    allocation: ResourceMatrix,
    request: ResourceMatrix,
    available: ResourceVector,
}

impl TryFrom<DetectionStateFields> for DetectionState {
    type Error = Error;

    fn try_from(fields: DetectionStateFields) -> Result<Self> {
        Self::new(fields.allocation, fields.request, fields.available)
    }
}
