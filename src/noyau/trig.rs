// src/noyau/trig.rs
//
// Trigonométrie selon le mode d’angle
// -----------------------------------
// - Le mode est lu à l’appel (jamais figé au parsing)
// - Degrés : conversion en radians, sauf multiples de 90° (valeurs exactes)
// - tan(90° + k·180°) : indéfini
// - sinh/cosh/tanh ne passent pas par ici (pas des fonctions d’angle)

use super::erreur::DomainError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn bascule(self) -> AngleMode {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            AngleMode::Degrees => "Deg",
            AngleMode::Radians => "Rad",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

/// sin/cos/tan de `x` interprété selon `mode`.
pub fn trig(f: TrigFn, x: f64, mode: AngleMode) -> Result<f64, DomainError> {
    match mode {
        AngleMode::Radians => Ok(brut(f, x)),
        AngleMode::Degrees => match quart_de_tour(f, x) {
            Some(exact) => exact,
            None => Ok(brut(f, x.to_radians())),
        },
    }
}

fn brut(f: TrigFn, rad: f64) -> f64 {
    match f {
        TrigFn::Sin => rad.sin(),
        TrigFn::Cos => rad.cos(),
        TrigFn::Tan => rad.tan(),
    }
}

/// Angles multiples de 90° : valeurs exactes (évite sin 180° = 1.22e-16).
/// None si l’angle n’est pas un quart de tour.
fn quart_de_tour(f: TrigFn, deg: f64) -> Option<Result<f64, DomainError>> {
    if !deg.is_finite() {
        return None;
    }
    let r = deg.rem_euclid(360.0);
    if r % 90.0 != 0.0 {
        return None;
    }

    // rem_euclid peut rendre 360.0 pour un angle négatif minuscule : tour complet
    let q = (r / 90.0) as u8 % 4;
    let v = match (f, q) {
        (TrigFn::Sin, 1) => Ok(1.0),
        (TrigFn::Sin, 3) => Ok(-1.0),
        (TrigFn::Sin, _) => Ok(0.0),

        (TrigFn::Cos, 0) => Ok(1.0),
        (TrigFn::Cos, 2) => Ok(-1.0),
        (TrigFn::Cos, _) => Ok(0.0),

        (TrigFn::Tan, 1 | 3) => Err(DomainError::UndefinedTangent),
        (TrigFn::Tan, _) => Ok(0.0),
    };
    Some(v)
}
