//! [`HadronSource`]: hadrons from a transport model as hydro sources.
//!
//! Hadrons are read into a master list (spectators optionally set
//! aside), then [`prepare_active_list`](HadronSource::prepare_active_list)
//! selects those crossing the current τ frame. Point queries smear every
//! active hadron with the [`SmearingKernel`] and scale by
//! `event_weight / (n_events · Δτ)`.
//!
//! Queries at a τ other than the prepared frame select hadrons from the
//! master list on the fly, so the source can also be integrated over τ.

use std::path::Path;

use fireball_core::{FlowVec, HydroSource, SourceError, HBARC};

use crate::hadron::Hadron;
use crate::kernel::SmearingKernel;
use crate::oscar::{self, OscarLayout};

/// τ frames closer than this are treated as the same frame.
const FRAME_TOLERANCE: f64 = 1e-9;

/// Conserved quantity deposited by a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    /// Energy-momentum `(p^τ, p^x, p^y, τp^η)`, deposited in fm⁻⁵ like
    /// the fluid's ε in fm⁻⁴.
    EnergyMomentum,
    /// Net baryon number.
    Baryon,
    /// Electric charge.
    Charge,
    /// Strangeness.
    Strangeness,
}

impl Quantity {
    fn carried_by(self, h: &Hadron) -> [f64; 4] {
        match self {
            Self::EnergyMomentum => h.milne_momentum().map(|p| p / HBARC),
            Self::Baryon => [h.baryon_number as f64, 0.0, 0.0, 0.0],
            Self::Charge => [h.electric_charge as f64, 0.0, 0.0, 0.0],
            Self::Strangeness => [h.strangeness as f64, 0.0, 0.0, 0.0],
        }
    }
}

/// Running totals over every hadron read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConservedTotals {
    /// Net baryon number.
    pub baryon: f64,
    /// Net electric charge.
    pub charge: f64,
    /// Net strangeness.
    pub strangeness: f64,
    /// Lab-frame four-momentum `(E, p_x, p_y, p_z)` (GeV).
    pub p: [f64; 4],
}

impl ConservedTotals {
    fn add(&mut self, h: &Hadron) {
        self.baryon += h.baryon_number as f64;
        self.charge += h.electric_charge as f64;
        self.strangeness += h.strangeness as f64;
        for (acc, v) in self.p.iter_mut().zip([h.e, h.px, h.py, h.pz]) {
            *acc += v;
        }
    }

    fn scaled(mut self, factor: f64) -> Self {
        self.baryon *= factor;
        self.charge *= factor;
        self.strangeness *= factor;
        for v in self.p.iter_mut() {
            *v *= factor;
        }
        self
    }
}

/// Hadronic source term.
#[derive(Clone, Debug)]
pub struct HadronSource {
    kernel: SmearingKernel,
    delta_tau: f64,
    reject_spectators: bool,
    event_weight: f64,
    hadrons: Vec<Hadron>,
    spectators: Vec<Hadron>,
    active: Vec<Hadron>,
    active_tau: Option<f64>,
    n_events: usize,
    totals: ConservedTotals,
}

/// Builder for [`HadronSource`].
#[derive(Clone, Debug)]
pub struct HadronSourceBuilder {
    sigma: f64,
    sigma_eta: f64,
    delta_tau: f64,
    covariant: bool,
    reject_spectators: bool,
    n_sigma_cut: f64,
    event_weight: f64,
}

impl HadronSource {
    /// Start configuring a source.
    pub fn builder() -> HadronSourceBuilder {
        HadronSourceBuilder {
            sigma: 0.5,
            sigma_eta: 0.5,
            delta_tau: 0.02,
            covariant: true,
            reject_spectators: true,
            n_sigma_cut: 4.0,
            event_weight: 1.0,
        }
    }

    /// The smearing kernel.
    pub fn kernel(&self) -> &SmearingKernel {
        &self.kernel
    }

    /// Evolution step Δτ (fm), the width of one τ frame.
    pub fn delta_tau(&self) -> f64 {
        self.delta_tau
    }

    /// Read events `first_event .. first_event + n_events` and append
    /// them. Spectators go to a separate list when rejection is on.
    pub fn read_events(
        &mut self,
        path: &Path,
        first_event: usize,
        n_events: usize,
        layout: OscarLayout,
    ) -> Result<(), SourceError> {
        let events = oscar::read_events(path, first_event, n_events, layout)?;
        for event in events {
            self.add_event(event);
        }
        log::info!(
            "{} hadrons from {} events, {} spectators set aside",
            self.hadrons.len(),
            self.n_events,
            self.spectators.len()
        );
        Ok(())
    }

    /// Append one event.
    pub fn add_event(&mut self, event: Vec<Hadron>) {
        self.n_events += 1;
        for h in event {
            if self.reject_spectators && h.is_spectator() {
                self.spectators.push(h);
            } else {
                self.totals.add(&h);
                self.hadrons.push(h);
            }
        }
        self.active_tau = None;
        self.active.clear();
    }

    /// Hadrons that may deposit.
    pub fn hadrons(&self) -> &[Hadron] {
        &self.hadrons
    }

    /// Hadrons set aside as spectators.
    pub fn spectators(&self) -> &[Hadron] {
        &self.spectators
    }

    /// Hadrons selected by the last
    /// [`prepare_active_list`](Self::prepare_active_list).
    pub fn active(&self) -> &[Hadron] {
        &self.active
    }

    /// Number of events read.
    pub fn n_events(&self) -> usize {
        self.n_events
    }

    /// Totals over every non-spectator hadron read.
    pub fn totals(&self) -> ConservedTotals {
        self.totals
    }

    /// Totals per averaged event, weighted by the event weight.
    pub fn per_event_totals(&self) -> ConservedTotals {
        self.totals.scaled(self.event_scale())
    }

    /// Select the hadrons that deposit in the frame around `tau`.
    pub fn prepare_active_list(&mut self, tau: f64) {
        let active: Vec<Hadron> = self
            .hadrons
            .iter()
            .filter(|h| self.in_frame(h, tau))
            .cloned()
            .collect();
        log::debug!("{} active hadrons at tau = {tau} fm", active.len());
        self.active = active;
        self.active_tau = Some(tau);
    }

    /// Whether `h` deposits in the frame `[τ − Δτ/2, τ + Δτ/2)`.
    pub fn in_frame(&self, h: &Hadron, tau: f64) -> bool {
        let (lo, hi) = (tau - self.delta_tau / 2.0, tau + self.delta_tau / 2.0);
        h.tau >= lo && h.tau < hi && h.formation_time < hi && h.time_last_collision < hi
    }

    /// Smeared density of `quantity` at `(τ, x, y, η)`.
    ///
    /// Scalar quantities are returned in component 0.
    pub fn source_density(&self, tau: f64, x: f64, y: f64, eta: f64, quantity: Quantity) -> [f64; 4] {
        let prepared = self
            .active_tau
            .is_some_and(|t| (t - tau).abs() < FRAME_TOLERANCE);
        if prepared {
            self.smear(self.active.iter(), tau, x, y, eta, quantity)
        } else {
            self.smear(
                self.hadrons.iter().filter(|h| self.in_frame(h, tau)),
                tau,
                x,
                y,
                eta,
                quantity,
            )
        }
    }

    fn smear<'h>(
        &self,
        hadrons: impl Iterator<Item = &'h Hadron>,
        tau: f64,
        x: f64,
        y: f64,
        eta: f64,
        quantity: Quantity,
    ) -> [f64; 4] {
        let mut total = [0.0; 4];
        for h in hadrons {
            let (dx, dy, deta) = (x - h.x, y - h.y, eta - h.eta_s);
            if !self.kernel.in_support(dx, dy, deta, tau) {
                continue;
            }
            let p = h.milne_momentum();
            let v = [p[1] / p[0], p[2] / p[0], p[3] / p[0]];
            let k = self.kernel.weight(dx, dy, deta, v, tau);
            for (acc, q) in total.iter_mut().zip(quantity.carried_by(h)) {
                *acc += q * k;
            }
        }
        let scale = self.event_scale() / self.delta_tau;
        total.map(|v| v * scale)
    }

    fn event_scale(&self) -> f64 {
        self.event_weight / self.n_events.max(1) as f64
    }
}

impl HadronSourceBuilder {
    /// Transverse kernel width σ (fm, default 0.5).
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Rapidity width of the non-covariant kernel (default 0.5).
    pub fn sigma_eta(mut self, sigma_eta: f64) -> Self {
        self.sigma_eta = sigma_eta;
        self
    }

    /// Frame width Δτ (fm, default 0.02).
    pub fn delta_tau(mut self, delta_tau: f64) -> Self {
        self.delta_tau = delta_tau;
        self
    }

    /// Use the covariant kernel (default true).
    pub fn covariant(mut self, covariant: bool) -> Self {
        self.covariant = covariant;
        self
    }

    /// Keep spectators out of the deposit (default true).
    pub fn reject_spectators(mut self, reject: bool) -> Self {
        self.reject_spectators = reject;
        self
    }

    /// Kernel cutoff in widths (default 4).
    pub fn n_sigma_cut(mut self, n: f64) -> Self {
        self.n_sigma_cut = n;
        self
    }

    /// Weight of each event (default 1).
    pub fn event_weight(mut self, weight: f64) -> Self {
        self.event_weight = weight;
        self
    }

    /// Validate and build an empty source.
    ///
    /// # Errors
    ///
    /// [`SourceError::InvalidKernel`] for non-positive widths, cutoff,
    /// Δτ, or a negative event weight.
    pub fn build(self) -> Result<HadronSource, SourceError> {
        let kernel = SmearingKernel::new(self.sigma, self.sigma_eta, self.covariant, self.n_sigma_cut)?;
        if !self.delta_tau.is_finite() || self.delta_tau <= 0.0 {
            return Err(SourceError::InvalidKernel {
                reason: format!("delta_tau must be finite and > 0, got {}", self.delta_tau),
            });
        }
        if !self.event_weight.is_finite() || self.event_weight < 0.0 {
            return Err(SourceError::InvalidKernel {
                reason: format!("event_weight must be finite and >= 0, got {}", self.event_weight),
            });
        }
        Ok(HadronSource {
            kernel,
            delta_tau: self.delta_tau,
            reject_spectators: self.reject_spectators,
            event_weight: self.event_weight,
            hadrons: Vec::new(),
            spectators: Vec::new(),
            active: Vec::new(),
            active_tau: None,
            n_events: 0,
            totals: ConservedTotals::default(),
        })
    }
}

impl HydroSource for HadronSource {
    fn tau_min(&self) -> f64 {
        self.hadrons.iter().map(|h| h.tau).reduce(f64::min).unwrap_or(0.0)
    }

    fn tau_max(&self) -> f64 {
        self.hadrons.iter().map(|h| h.tau).reduce(f64::max).unwrap_or(0.0)
    }

    fn frame_width(&self) -> Option<f64> {
        Some(self.delta_tau)
    }

    fn energy_source(&self, tau: f64, x: f64, y: f64, eta: f64, _u: &FlowVec) -> [f64; 4] {
        self.source_density(tau, x, y, eta, Quantity::EnergyMomentum)
    }

    fn baryon_source(&self, tau: f64, x: f64, y: f64, eta: f64, _u: &FlowVec) -> f64 {
        self.source_density(tau, x, y, eta, Quantity::Baryon)[0]
    }

    fn charge_source(&self, tau: f64, x: f64, y: f64, eta: f64, _u: &FlowVec) -> f64 {
        self.source_density(tau, x, y, eta, Quantity::Charge)[0]
    }

    fn strangeness_source(&self, tau: f64, x: f64, y: f64, eta: f64, _u: &FlowVec) -> f64 {
        self.source_density(tau, x, y, eta, Quantity::Strangeness)[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireball_core::REST_FLOW;

    fn pion(tau: f64, x: f64, charge: i32) -> Hadron {
        let mut h = Hadron::from_lab(tau, x, 0.0, 0.0, 0.14, 0.5, 0.0, 0.0, 0.0, 211).unwrap();
        h.electric_charge = charge;
        h
    }

    fn source() -> HadronSource {
        HadronSource::builder().delta_tau(0.1).build().unwrap()
    }

    #[test]
    fn builder_validates() {
        assert!(HadronSource::builder().sigma(-1.0).build().is_err());
        assert!(HadronSource::builder().delta_tau(0.0).build().is_err());
        assert!(HadronSource::builder().event_weight(f64::INFINITY).build().is_err());
    }

    #[test]
    fn active_window_is_half_open() {
        let mut s = HadronSource::builder().delta_tau(0.5).build().unwrap();
        s.add_event(vec![
            pion(0.5, 0.0, 1),
            pion(0.75, 0.0, 1),
            pion(1.0, 0.0, 1),
            pion(1.25, 0.0, 1),
        ]);
        s.prepare_active_list(1.0);
        let taus: Vec<f64> = s.active().iter().map(|h| h.tau).collect();
        assert_eq!(taus, vec![0.75, 1.0]);
    }

    #[test]
    fn unformed_hadrons_wait() {
        let mut s = source();
        let mut late = pion(1.0, 0.0, 1);
        late.formation_time = 1.2;
        s.add_event(vec![late]);
        s.prepare_active_list(1.0);
        assert!(s.active().is_empty());
    }

    #[test]
    fn spectators_are_set_aside_and_not_counted() {
        let mut s = source();
        let mut spectator = Hadron::from_lab(1.0, 0.0, 0.0, 0.0, 0.938, 1.0, 0.0, 0.0, 0.0, 2212).unwrap();
        spectator.ncoll = 0.0;
        s.add_event(vec![spectator, pion(1.0, 0.0, -1)]);
        assert_eq!(s.spectators().len(), 1);
        assert_eq!(s.hadrons().len(), 1);
        assert_eq!(s.totals().baryon, 0.0);
        assert_eq!(s.totals().charge, -1.0);
    }

    #[test]
    fn per_event_totals_average_over_events() {
        let mut s = HadronSource::builder().event_weight(0.5).build().unwrap();
        s.add_event(vec![pion(1.0, 0.0, 1), pion(1.0, 0.0, 1)]);
        s.add_event(vec![pion(1.0, 0.0, 1), pion(1.0, 0.0, -1)]);
        let t = s.per_event_totals();
        assert_eq!(t.charge, 0.5);
        assert_eq!(t.p[0], 0.5);
    }

    #[test]
    fn prepared_and_on_the_fly_queries_agree() {
        let mut s = source();
        s.add_event(vec![pion(1.0, 0.2, 1), pion(1.02, -0.1, 1), pion(1.3, 0.0, 1)]);
        let fly = s.energy_source(1.0, 0.0, 0.0, 0.0, &REST_FLOW);
        s.prepare_active_list(1.0);
        let prepared = s.energy_source(1.0, 0.0, 0.0, 0.0, &REST_FLOW);
        assert_eq!(fly, prepared);
        assert!(fly[0] > 0.0);
        assert_eq!(s.charge_source(2.0, 0.0, 0.0, 0.0, &REST_FLOW), 0.0);
    }

    #[test]
    fn frames_are_delta_tau_wide() {
        assert_eq!(source().frame_width(), Some(0.1));
    }

    #[test]
    fn tau_range_spans_master_list() {
        let mut s = source();
        assert_eq!((s.tau_min(), s.tau_max()), (0.0, 0.0));
        s.add_event(vec![pion(1.5, 0.0, 0), pion(0.7, 0.0, 0), pion(2.5, 0.0, 0)]);
        assert_eq!((s.tau_min(), s.tau_max()), (0.7, 2.5));
    }
}
