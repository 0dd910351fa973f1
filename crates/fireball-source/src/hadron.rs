//! Hadron records from a transport model.

/// One hadron, positioned in Milne coordinates.
///
/// Lab-frame energy and momenta are kept alongside the derived proper
/// time, spacetime rapidity, and momentum rapidity.
#[derive(Clone, Debug, PartialEq)]
pub struct Hadron {
    /// PDG Monte Carlo code.
    pub pdg: i32,
    /// Particle id within the event.
    pub id: i32,
    /// Proper time τ = √(t² − z²) (fm).
    pub tau: f64,
    /// Transverse position (fm).
    pub x: f64,
    /// Transverse position (fm).
    pub y: f64,
    /// Spacetime rapidity η_s = atanh(z/t).
    pub eta_s: f64,
    /// Momentum rapidity y = atanh(p_z/E).
    pub rapidity: f64,
    /// Transverse rapidity atanh(p_T/E).
    pub rapidity_perp: f64,
    /// Energy (GeV).
    pub e: f64,
    /// Momentum (GeV).
    pub px: f64,
    /// Momentum (GeV).
    pub py: f64,
    /// Momentum (GeV).
    pub pz: f64,
    /// Mass (GeV).
    pub mass: f64,
    /// Number of collisions the hadron took part in. Zero for spectators.
    pub ncoll: f64,
    /// Formation time (fm).
    pub formation_time: f64,
    /// Cross-section scaling while not yet formed.
    pub cross_section_factor: f64,
    /// Time of the last interaction (fm).
    pub time_last_collision: f64,
    /// Net baryon number.
    pub baryon_number: i32,
    /// Net strangeness.
    pub strangeness: i32,
    /// Electric charge.
    pub electric_charge: i32,
    /// Id of the process that produced the hadron.
    pub process_id_origin: i32,
    /// Type of the process that produced the hadron.
    pub process_type_origin: i32,
    /// PDG codes of the parents.
    pub parent_pdg: [i32; 2],
}

impl Hadron {
    /// Build a hadron from lab-frame position and momentum.
    ///
    /// Returns `None` when the point lies outside the forward light cone
    /// (`t <= |z|`) or the momentum is not timelike (`E <= |p_z|`).
    /// Bookkeeping fields take neutral defaults: one collision, formed at
    /// `t = 0`, baryon number from the PDG code.
    #[allow(clippy::too_many_arguments)]
    pub fn from_lab(
        t: f64,
        x: f64,
        y: f64,
        z: f64,
        mass: f64,
        e: f64,
        px: f64,
        py: f64,
        pz: f64,
        pdg: i32,
    ) -> Option<Self> {
        if t <= z.abs() || e <= pz.abs() {
            return None;
        }
        let pt = px.hypot(py);
        Some(Self {
            pdg,
            id: 0,
            tau: (t * t - z * z).sqrt(),
            x,
            y,
            eta_s: (z / t).atanh(),
            rapidity: (pz / e).atanh(),
            rapidity_perp: (pt / e).min(1.0 - f64::EPSILON).atanh(),
            e,
            px,
            py,
            pz,
            mass,
            ncoll: 1.0,
            formation_time: 0.0,
            cross_section_factor: 1.0,
            time_last_collision: 0.0,
            baryon_number: baryon_number_from_pdg(pdg),
            strangeness: 0,
            electric_charge: 0,
            process_id_origin: 0,
            process_type_origin: 0,
            parent_pdg: [0, 0],
        })
    }

    /// Transverse mass `√(E² − p_z²)`.
    pub fn transverse_mass(&self) -> f64 {
        (self.e * self.e - self.pz * self.pz).max(0.0).sqrt()
    }

    /// Milne momentum `(p^τ, p^x, p^y, τ·p^η)` at the hadron's position.
    pub fn milne_momentum(&self) -> [f64; 4] {
        let mt = self.transverse_mass();
        let dy = self.rapidity - self.eta_s;
        [mt * dy.cosh(), self.px, self.py, mt * dy.sinh()]
    }

    /// Whether the hadron never interacted.
    pub fn is_spectator(&self) -> bool {
        self.ncoll == 0.0
    }
}

/// Baryon number encoded in a PDG code.
///
/// Ordinary baryons carry a non-zero thousands digit (`±1`). Nuclear
/// codes `±10LZZZAAAI` carry their mass number `A`.
pub fn baryon_number_from_pdg(pdg: i32) -> i32 {
    let code = pdg.unsigned_abs();
    let magnitude = if code >= 1_000_000_000 {
        ((code / 10) % 1000) as i32
    } else if (code / 1000) % 10 != 0 {
        1
    } else {
        0
    };
    magnitude * pdg.signum()
}
