// src/app/vue.rs
//
// Vue (UI egui)
// -------------
// Objectifs :
// - Afficheur type calculatrice : texte aligné à droite, "Error" en couleur d’erreur
// - Indicateurs : M (mémoire non nulle) + mode d’angle
// - Pavé scientifique 10 colonnes, une touche = un appel à handle_key
// - Démarche (jetons / RPN / arbre) du dernier "=" dans un panneau repliable
//
// Note :
// - La vue ne modifie jamais le texte affiché elle-même (tout passe par etat.rs).

use eframe::egui;

use super::etat::AppCalc;

/// Disposition du pavé. "" = case vide ; "Rad" est réécrit selon le mode courant.
const PAVE: [[&str; 10]; 5] = [
    ["(", ")", "mc", "m+", "m-", "mr", "C", "±", "%", "÷"],
    ["⌫", "x²", "x³", "xʸ", "eˣ", "10ˣ", "7", "8", "9", "×"],
    ["1/x", "²√x", "³√x", "", "ln", "log₁₀", "4", "5", "6", "−"],
    ["x!", "sin", "cos", "tan", "e", "EE", "1", "2", "3", "+"],
    ["Rad", "sinh", "cosh", "tanh", "π", "", "0", "", ".", "="],
];

const TAILLE_TOUCHE: [f32; 2] = [52.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_afficheur(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_afficheur(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                // Indicateurs
                ui.horizontal(|ui| {
                    let m = if self.memoire_active() { "M" } else { " " };
                    ui.monospace(m);
                    ui.monospace(self.calc.mode().libelle());
                });

                let couleur = if self.affichage.erreur {
                    ui.visuals().error_fg_color
                } else {
                    ui.visuals().strong_text_color()
                };

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.affichage.texte)
                            .monospace()
                            .size(34.0)
                            .color(couleur),
                    );
                });
            });

        if !self.detail.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.detail);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        // Libellé de la touche de mode : le mode vers lequel on bascule
        let bascule = self.calc.mode().bascule().libelle();

        egui::Grid::new("pave_scientifique")
            .num_columns(10)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for g in rangee {
                        match g {
                            "" => {
                                ui.label("");
                            }
                            "Rad" => self.bouton(ui, bascule),
                            _ => self.bouton(ui, g),
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, glyphe: &str) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(glyphe));
        if resp.clicked() {
            self.appuyer_glyphe(glyphe);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| match self.calc.demarche() {
                Some(d) => {
                    Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                    Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                    Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                }
                None => {
                    ui.monospace("aucun calcul");
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
