//! Range restrictions
//!
//! A range restriction is a non-empty, strictly ascending, pairwise
//! disjoint sequence of closed intervals over numeric typed values.
//! Restrictions narrow monotonically along a typedef chain: a layered
//! restriction must fit inside the one it derives from.

use crate::error::{DataModelError, Error, Result};
use crate::locations::SourceLocation;
use crate::types::builtins::BuiltinType;
use crate::types::values::TypedValue;
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Range Interval
// =============================================================================

/// Closed interval `[start, end]` with `start <= end`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeInterval {
    start: TypedValue,
    end: TypedValue,
}

impl RangeInterval {
    /// Create an interval; the bounds must be numeric and ordered
    pub fn new(start: TypedValue, end: TypedValue) -> Result<Self> {
        match start.partial_cmp(&end) {
            Some(Ordering::Less) | Some(Ordering::Equal) if start.is_numeric() => {
                Ok(Self { start, end })
            }
            _ => Err(Error::OutOfOrder(DataModelError::new(format!(
                "Range interval start {} is not lesser than or equal to its end {}",
                start, end
            )))),
        }
    }

    /// Create a single-value interval
    pub fn single(value: TypedValue) -> Result<Self> {
        Self::new(value.clone(), value)
    }

    /// Lower bound
    pub fn start(&self) -> &TypedValue {
        &self.start
    }

    /// Upper bound
    pub fn end(&self) -> &TypedValue {
        &self.end
    }

    /// Check if a value lies within the closed bounds
    pub fn contains(&self, value: &TypedValue) -> bool {
        matches!(
            self.start.partial_cmp(value),
            Some(Ordering::Less) | Some(Ordering::Equal)
        ) && matches!(
            self.end.partial_cmp(value),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )
    }

    /// Check if another interval lies wholly inside this one
    pub fn contains_interval(&self, other: &RangeInterval) -> bool {
        self.contains(&other.start) && self.contains(&other.end)
    }
}

impl fmt::Display for RangeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

// =============================================================================
// Range Restriction
// =============================================================================

/// Ascending set of disjoint range intervals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeRestriction {
    intervals: Vec<RangeInterval>,
    /// Range expression as written in the module
    expression: Option<String>,
    /// Textual description
    description: Option<String>,
    /// Textual reference
    reference: Option<String>,
    /// Where the range statement was declared
    location: Option<SourceLocation>,
}

impl RangeRestriction {
    /// Create an empty restriction under construction
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a restriction from intervals, in order
    pub fn from_intervals(intervals: impl IntoIterator<Item = RangeInterval>) -> Result<Self> {
        let mut restriction = Self::new();
        for interval in intervals {
            restriction.add_interval(interval)?;
        }
        Ok(restriction)
    }

    /// Parse a range expression such as `"1..10 | 20..max"`
    ///
    /// `min` and `max` resolve against the inherited restriction, or against
    /// the bounds of `kind` when nothing is inherited. Every parsed interval
    /// must fit inside the inherited restriction.
    pub fn parse(
        expression: &str,
        kind: BuiltinType,
        inherited: Option<&RangeRestriction>,
    ) -> Result<Self> {
        let (type_min, type_max) = kind.default_bounds().ok_or_else(|| {
            Error::LiteralFormat(format!("type {} does not admit a range restriction", kind))
        })?;
        let lower = match inherited {
            Some(parent) => parent.min()?.clone(),
            None => type_min,
        };
        let upper = match inherited {
            Some(parent) => parent.max()?.clone(),
            None => type_max,
        };

        let bound = |token: &str| -> Result<TypedValue> {
            match token {
                "min" => Ok(lower.clone()),
                "max" => Ok(upper.clone()),
                literal => TypedValue::parse(literal, kind),
            }
        };

        let mut restriction = Self::new().with_expression(expression);
        for part in expression.split('|') {
            let part = part.trim();
            let interval = match part.split_once("..") {
                Some((start, end)) => RangeInterval::new(bound(start.trim())?, bound(end.trim())?)?,
                None => RangeInterval::single(bound(part)?)?,
            };
            restriction.add_interval(interval)?;
        }

        if let Some(parent) = inherited {
            for interval in &restriction.intervals {
                parent.is_valid_interval(interval)?;
            }
        }

        Ok(restriction)
    }

    /// Set the range expression text
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the declaring location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Range expression as written in the module
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Textual description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Textual reference
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Intervals in ascending order
    pub fn intervals(&self) -> &[RangeInterval] {
        &self.intervals
    }

    /// Check if no interval has been added yet
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    fn error(&self, message: impl Into<String>) -> DataModelError {
        DataModelError::new(message).with_location(self.location.clone())
    }

    /// Minimum valid value: the first interval's start
    pub fn min(&self) -> Result<&TypedValue> {
        self.intervals
            .first()
            .map(RangeInterval::start)
            .ok_or_else(|| Error::EmptyRestriction(self.error("No range interval info")))
    }

    /// Maximum valid value: the last interval's end
    pub fn max(&self) -> Result<&TypedValue> {
        self.intervals
            .last()
            .map(RangeInterval::end)
            .ok_or_else(|| Error::EmptyRestriction(self.error("No range interval info")))
    }

    /// Append an interval past the current maximum
    ///
    /// The new interval must start strictly after the current maximum;
    /// touching intervals (`start == max`) are rejected.
    pub fn add_interval(&mut self, interval: RangeInterval) -> Result<()> {
        if let Some(last) = self.intervals.last() {
            if interval.start.partial_cmp(&last.end) != Some(Ordering::Greater) {
                return Err(Error::OutOfOrder(self.error(format!(
                    "New added range interval {} is lesser than the old interval(s)",
                    interval
                ))));
            }
        }
        self.intervals.push(interval);
        Ok(())
    }

    /// Check if a value lies within any interval
    pub fn is_valid(&self, value: &TypedValue) -> Result<bool> {
        if self.intervals.is_empty() {
            return Err(Error::EmptyRestriction(
                self.error("Range interval missing in range restriction."),
            ));
        }
        Ok(self.intervals.iter().any(|i| i.contains(value)))
    }

    /// Check a literal, parsed as the type of this restriction's bounds
    pub fn is_valid_literal(&self, raw: &str) -> Result<bool> {
        let kind = self.min()?.builtin_type();
        let value = TypedValue::parse(raw, kind)?;
        self.is_valid(&value)
    }

    /// Confirm that a candidate interval lies wholly inside one interval
    ///
    /// Fails with [`Error::RestrictionNarrowing`] when it does not.
    pub fn is_valid_interval(&self, candidate: &RangeInterval) -> Result<bool> {
        if self.intervals.is_empty() {
            return Err(Error::EmptyRestriction(
                self.error("Range interval missing in range restriction."),
            ));
        }
        if self.intervals.iter().any(|i| i.contains_interval(candidate)) {
            Ok(true)
        } else {
            Err(Error::RestrictionNarrowing(self.error(format!(
                "Range interval {} doesn't fall within the referred restriction ranges {}",
                candidate, self
            ))))
        }
    }

    /// Validate a value and report a range violation
    pub fn validate(&self, value: &TypedValue) -> Result<()> {
        if self.is_valid(value)? {
            Ok(())
        } else {
            Err(Error::RangeViolation(format!(
                "value {} is outside the range {}",
                value, self
            )))
        }
    }
}

impl fmt::Display for RangeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.intervals.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(" | "))
    }
}
