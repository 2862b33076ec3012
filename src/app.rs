// src/app.rs
//
// Calculatrice scientifique : module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App
//
// Clavier (global, pas de champ texte) :
// - caractères tapés => Touche::depuis_glyphe (chiffres, + - * / ^ ( ) . % ! = e)
// - Enter = "=", Escape = "C", Backspace = "⌫"

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Touche;

impl AppCalc {
    /// Traduit les événements clavier de la frame en touches.
    fn clavier(&mut self, ctx: &egui::Context) {
        let (textes, entree, echap, retour) = ctx.input(|i| {
            let textes: Vec<String> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Text(t) => Some(t.clone()),
                    _ => None,
                })
                .collect();
            (
                textes,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Backspace),
            )
        });

        for t in textes {
            for c in t.chars() {
                let mut buf = [0u8; 4];
                self.appuyer_glyphe(c.encode_utf8(&mut buf));
            }
        }
        if entree {
            self.appuyer(Touche::Egal);
        }
        if echap {
            self.appuyer(Touche::Effacer);
        }
        if retour {
            self.appuyer(Touche::Retour);
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
