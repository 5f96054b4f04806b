//! Builds contractors from configuration.

use intervalforge_config::{ConfigError, ContractorConfig};
use intervalforge_core::{Contractor, DifferentiableSystem, VarSet};
use thiserror::Error;
use tracing::info;

use crate::acid::CtcAcid;
use crate::bound_shaving::BoundShaving;
use crate::three_b_cid::Ctc3BCid;

/// Error building a contractor.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("variable set is defined over {vars} variables, sub-contractor has {ctc}")]
    DimensionMismatch { vars: usize, ctc: usize },

    #[error("system has {system} variables, sub-contractor has {ctc}")]
    SystemMismatch { system: usize, ctc: usize },
}

/// Builder for the shaving contractors.
///
/// # Examples
///
/// ```
/// use intervalforge_config::ContractorConfig;
/// use intervalforge_contract::ContractorBuilder;
/// use intervalforge_core::{Contractor, Interval, IntervalVector};
/// use intervalforge_test::threshold::UpperBound;
///
/// let config = ContractorConfig::from_toml_str("[shaving]\nmax_slices = 20").unwrap();
/// let mut ctc = ContractorBuilder::new(config)
///     .build_3bcid(Box::new(UpperBound::new(1, 0, 5.0)))
///     .unwrap();
///
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);
/// ctc.contract_box(&mut domain).unwrap();
/// assert_eq!(domain[0], Interval::new(0.0, 5.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContractorBuilder {
    config: ContractorConfig,
    vars: Option<VarSet>,
}

impl ContractorBuilder {
    /// Creates a builder from a configuration.
    pub fn new(config: ContractorConfig) -> Self {
        Self { config, vars: None }
    }

    /// Restricts the built contractors to `vars`.
    ///
    /// By default every variable of the sub-contractor is handled.
    pub fn with_vars(mut self, vars: VarSet) -> Self {
        self.vars = Some(vars);
        self
    }

    pub fn config(&self) -> &ContractorConfig {
        &self.config
    }

    /// Builds a [`Ctc3BCid`].
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a variable set of the wrong
    /// dimension.
    pub fn build_3bcid(&self, ctc: Box<dyn Contractor>) -> Result<Ctc3BCid, BuildError> {
        let vars = self.prepare(ctc.nb_var())?;
        info!(event = "build", contractor = "3bcid", handled = vars.len() as u64);
        Ok(Ctc3BCid::with_vars(vars, ctc, self.config.shaving))
    }

    /// Builds a [`CtcAcid`].
    ///
    /// # Errors
    ///
    /// Also fails when the system and the sub-contractor have different
    /// dimensions.
    pub fn build_acid(
        &self,
        system: Box<dyn DifferentiableSystem>,
        ctc: Box<dyn Contractor>,
    ) -> Result<CtcAcid, BuildError> {
        if system.nb_var() != ctc.nb_var() {
            return Err(BuildError::SystemMismatch {
                system: system.nb_var(),
                ctc: ctc.nb_var(),
            });
        }
        let vars = self.prepare(ctc.nb_var())?;
        info!(event = "build", contractor = "acid", handled = vars.len() as u64);
        Ok(CtcAcid::with_vars(
            vars,
            system,
            ctc,
            self.config.shaving,
            self.config.adaptive,
        ))
    }

    /// Builds a [`BoundShaving`].
    pub fn build_bound_shaving(&self, ctc: Box<dyn Contractor>) -> Result<BoundShaving, BuildError> {
        let vars = self.prepare(ctc.nb_var())?;
        info!(event = "build", contractor = "bound_shaving", handled = vars.len() as u64);
        Ok(BoundShaving::with_vars(
            vars,
            ctc,
            self.config.shaving,
            self.config.bound_shaving,
        ))
    }

    fn prepare(&self, nb_var: usize) -> Result<VarSet, BuildError> {
        self.config.validate()?;
        match &self.vars {
            Some(vars) if vars.nb_var() != nb_var => Err(BuildError::DimensionMismatch {
                vars: vars.nb_var(),
                ctc: nb_var,
            }),
            Some(vars) => Ok(vars.clone()),
            None => Ok(VarSet::all(nb_var)),
        }
    }
}
