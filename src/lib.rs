//! Calculatrice scientifique
//!
//! - `noyau` : tokenisation, analyse, évaluation sûre, machine d’état (sans UI)
//! - `app`   : état + vue egui au-dessus de la machine d’état

pub mod app;
pub mod noyau;
