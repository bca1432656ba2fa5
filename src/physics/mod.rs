//! Physical model of the study
//!
//! An undamped mass on a spring, released from rest position with an initial
//! velocity: $m\ddot{x} = -kx$, $x(0) = 0$, $\dot{x}(0) = v_0$.
//!
//! The closed-form solution is
//!
//! $$x(t) = \frac{v_0}{\omega}\sin(\omega t), \qquad \omega = \sqrt{k/m}$$
//!
//! # Example
//!
//! ```rust
//! use spring_study::physics::SpringConstants;
//!
//! let spring = SpringConstants::default();
//! assert_eq!(spring.omega(), 1.0);
//! assert_eq!(spring.displacement(0.0), 0.0);
//! ```

mod oscillator;

pub use oscillator::SpringConstants;
