//! Undamped spring oscillator
//!
//! The system is a unit particle on a linear spring, released from the
//! equilibrium position with velocity $v_0$:
//!
//! $$m \ddot{x} = -k x, \quad x(0) = 0, \quad \dot{x}(0) = v_0$$
//!
//! with closed-form solution
//!
//! $$x(t) = A \sin(\omega t), \quad \omega = \sqrt{k/m}, \quad A = v_0 / \omega$$
//!
//! The three constants are fixed for a whole convergence study: error values
//! computed with different constants are not comparable.

use std::f64::consts::PI;

use nalgebra::DVector;

/// Physical constants of the spring system
///
/// # Example
///
/// ```rust
/// use spring_study::physics::SpringConstants;
///
/// let spring = SpringConstants::default();
/// assert_eq!(spring.omega(), 1.0);
/// assert_eq!(spring.amplitude(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConstants {
    /// Spring constant k (N/m)
    pub stiffness: f64,

    /// Particle mass m (kg)
    pub mass: f64,

    /// Initial velocity v₀ (m/s)
    pub initial_velocity: f64,
}

impl Default for SpringConstants {
    fn default() -> Self {
        Self {
            stiffness: 1.0,
            mass: 1.0,
            initial_velocity: 1.0,
        }
    }
}

impl SpringConstants {
    pub fn new(stiffness: f64, mass: f64, initial_velocity: f64) -> Self {
        Self {
            stiffness,
            mass,
            initial_velocity,
        }
    }

    /// Angular frequency ω = √(k/m)
    pub fn omega(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Amplitude A = v₀/ω
    pub fn amplitude(&self) -> f64 {
        self.initial_velocity / self.omega()
    }

    /// Oscillation period 2π/ω
    pub fn period(&self) -> f64 {
        2.0 * PI / self.omega()
    }

    /// Acceleration at position `x`: a = -(k/m)·x
    pub fn acceleration(&self, position: f64) -> f64 {
        -self.stiffness / self.mass * position
    }

    /// Analytic displacement x(t) = A·sin(ωt)
    pub fn displacement(&self, time: f64) -> f64 {
        self.amplitude() * (self.omega() * time).sin()
    }

    /// Vibration equation, e.g. `x(t) = 1.000000·sin(1.000000·t)`
    pub fn equation(&self) -> String {
        format!("x(t) = {:.6}·sin({:.6}·t)", self.amplitude(), self.omega())
    }

    /// Analytic displacement evaluated at every sample time
    pub fn analytic_curve(&self, times: &DVector<f64>) -> DVector<f64> {
        let omega = self.omega();
        let amplitude = self.amplitude();
        times.map(|t| amplitude * (omega * t).sin())
    }

    /// Check that the constants describe an oscillating system
    pub fn validate(&self) -> Result<(), String> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(format!("Spring constant must be positive (got {})", self.stiffness));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(format!("Mass must be positive (got {})", self.mass));
        }
        if !self.initial_velocity.is_finite() {
            return Err("Initial velocity must be finite".to_string());
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
