//! Generation-gated rebuild control for one mounted 3D view.
//!
//! The controller owns the external renderer adapter and decides, per
//! submitted configuration, whether the scene must be rebuilt or left
//! untouched. Completion of a rebuild is asynchronous and may arrive out
//! of submission order; a monotonically increasing generation counter
//! ensures only the result matching the latest submitted configuration is
//! ever applied. Stale results are discarded, never cancelled: that keeps
//! the engine independent of cooperative cancellation support in the
//! renderer.

use std::fmt;

use crate::adapter::ViewAdapter;
use crate::config::ViewConfig;
use crate::error::{ConfigError, LoadError};
use crate::scene::SceneDescription;
use crate::style::OverrideWarning;

/// Monotonically increasing counter identifying one rebuild attempt.
///
/// Process-local, per controller instance; never shared across views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct Generation(u64);

impl Generation {
    /// The next generation.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation {}", self.0)
    }
}

/// Lifecycle state of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum RebuildState {
    /// No scene; adapter idle or released.
    Idle,
    /// An asynchronous load/apply is in flight.
    Building {
        /// The attempt's generation.
        generation: Generation,
        /// The description being applied; becomes current on success.
        pending: SceneDescription,
    },
    /// The scene matching `description` is live in the renderer.
    Ready {
        /// Generation of the applied configuration.
        generation: Generation,
        /// The applied description; the no-op comparison target.
        description: SceneDescription,
    },
    /// The latest rebuild attempt failed. Not retried automatically; the
    /// previously applied scene (if any) stays visible.
    Failed {
        /// Generation of the failed attempt.
        generation: Generation,
        /// The renderer-reported failure.
        error: LoadError,
    },
}

/// What [`RebuildController::submit`] decided.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The candidate description equals the current one; nothing was sent
    /// to the renderer.
    Unchanged {
        /// The still-current generation.
        generation: Generation,
    },
    /// A rebuild was started.
    Rebuilding {
        /// Generation of the new attempt.
        generation: Generation,
        /// Overrides dropped during style resolution, batched for the
        /// host.
        warnings: Vec<OverrideWarning>,
    },
}

/// What a completion delivered to [`RebuildController::complete`] meant.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The result matched the latest generation and the scene is live.
    Applied {
        /// The applied generation.
        generation: Generation,
    },
    /// The result matched the latest generation but the load failed.
    Failed {
        /// The failed generation.
        generation: Generation,
        /// The renderer-reported failure.
        error: LoadError,
    },
    /// The result belonged to a superseded attempt and was discarded.
    Superseded {
        /// The stale generation the result carried.
        generation: Generation,
    },
}

/// Owns one external renderer adapter and the rebuild state machine for
/// one mounted view instance.
pub struct RebuildController<A: ViewAdapter> {
    adapter: A,
    state: RebuildState,
    generation: Generation,
    last_good: Option<SceneDescription>,
    released: bool,
}

impl<A: ViewAdapter> RebuildController<A> {
    /// Take ownership of a freshly acquired adapter.
    #[must_use]
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            state: RebuildState::Idle,
            generation: Generation::default(),
            last_good: None,
            released: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &RebuildState {
        &self.state
    }

    /// Latest generation handed to the adapter.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The adapter, for hosts that need to reach the renderer directly.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the adapter.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// The description the renderer is currently showing: the `Ready`
    /// description, or after a failure the last successfully applied one.
    #[must_use]
    pub fn last_applied(&self) -> Option<&SceneDescription> {
        if let RebuildState::Ready { description, .. } = &self.state {
            return Some(description);
        }
        self.last_good.as_ref()
    }

    /// Process a configuration change.
    ///
    /// Computes the candidate description; if it structurally equals the
    /// live (or in-flight) one this is a no-op. Otherwise the generation
    /// advances and the adapter starts applying the new description.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the configuration is rejected; state and
    /// generation are untouched and no rebuild is attempted.
    pub fn submit(
        &mut self,
        config: &ViewConfig,
    ) -> Result<SubmitOutcome, ConfigError> {
        let (candidate, warnings) = SceneDescription::build(config)?;

        let unchanged = match &self.state {
            RebuildState::Ready { description, .. } => *description == candidate,
            RebuildState::Building { pending, .. } => *pending == candidate,
            RebuildState::Idle | RebuildState::Failed { .. } => false,
        };
        if unchanged {
            log::debug!(
                "configuration unchanged at {}, skipping rebuild",
                self.generation
            );
            return Ok(SubmitOutcome::Unchanged {
                generation: self.generation,
            });
        }

        // The outgoing Ready scene stays visible while the new one loads,
        // and remains the fallback if the load fails.
        if let RebuildState::Ready { description, .. } =
            std::mem::replace(&mut self.state, RebuildState::Idle)
        {
            self.last_good = Some(description);
        }

        self.generation = self.generation.next();
        log::debug!(
            "starting rebuild at {} (fingerprint {:016x})",
            self.generation,
            candidate.fingerprint()
        );
        self.adapter.begin_apply(&candidate, self.generation);
        self.state = RebuildState::Building {
            generation: self.generation,
            pending: candidate,
        };
        Ok(SubmitOutcome::Rebuilding {
            generation: self.generation,
            warnings,
        })
    }

    /// Deliver the result of an asynchronous load/apply.
    ///
    /// Results tagged with a superseded generation are discarded silently;
    /// this is the "last write wins at the apply boundary" rule that keeps
    /// rapid successive configuration changes from applying out of order.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<(), LoadError>,
    ) -> ApplyOutcome {
        if generation != self.generation {
            log::debug!(
                "discarding superseded result for {generation} (current {})",
                self.generation
            );
            return ApplyOutcome::Superseded { generation };
        }
        match std::mem::replace(&mut self.state, RebuildState::Idle) {
            RebuildState::Building {
                generation: started,
                pending,
            } if started == generation => match result {
                Ok(()) => {
                    log::info!("applied scene for {generation}");
                    self.last_good = Some(pending.clone());
                    self.state = RebuildState::Ready {
                        generation,
                        description: pending,
                    };
                    ApplyOutcome::Applied { generation }
                }
                Err(error) => {
                    log::warn!("rebuild failed for {generation}: {error}");
                    self.state = RebuildState::Failed {
                        generation,
                        error: error.clone(),
                    };
                    ApplyOutcome::Failed { generation, error }
                }
            },
            other => {
                // A completion for a generation that is not building
                // (double delivery); nothing to apply.
                self.state = other;
                log::debug!("ignoring spurious completion for {generation}");
                ApplyOutcome::Superseded { generation }
            }
        }
    }

    /// Tear down the view: any state goes to `Idle` and the adapter is
    /// released. Safe to call more than once; also runs on drop so the
    /// renderer is released on every exit path.
    pub fn release(&mut self) {
        self.state = RebuildState::Idle;
        if !self.released {
            self.released = true;
            self.adapter.release();
        }
    }
}

impl<A: ViewAdapter> Drop for RebuildController<A> {
    fn drop(&mut self) {
        self.release();
    }
}
