// src/app/export.rs
//
// Export de l’historique vers un fichier texte
// --------------------------------------------
// - Un seul chemin, choisi par l’utilisateur ; contenu remplacé.
// - Fichier ouvert, écrit (tampon), vidé puis fermé dans le même appel, sur tous les chemins.
// - Échecs non fatals, classés en trois cas.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurExport {
    /// Dossier absent, chemin vide.
    #[error("chemin introuvable")]
    CheminIntrouvable,
    /// Toute autre erreur d’entrée/sortie (droits, dossier à la place du fichier, disque plein…).
    #[error("erreur d’écriture ({0})")]
    Ecriture(io::ErrorKind),
    /// Chemin invalide (octet nul…) ou cas non classé.
    #[error("erreur inconnue: {0}")]
    Inconnue(String),
}

impl From<io::Error> for ErreurExport {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => ErreurExport::CheminIntrouvable,
            io::ErrorKind::InvalidInput => ErreurExport::Inconnue(e.to_string()),
            kind => ErreurExport::Ecriture(kind),
        }
    }
}

pub trait Exportateur {
    fn exporter(&self, chemin: &Path, texte: &str) -> Result<(), ErreurExport>;
}

/// Export réel sur le système de fichiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportFichier;

impl Exportateur for ExportFichier {
    fn exporter(&self, chemin: &Path, texte: &str) -> Result<(), ErreurExport> {
        let mut sortie = BufWriter::new(File::create(chemin)?);
        sortie.write_all(texte.as_bytes())?;
        sortie.flush()?;
        Ok(())
    }
}
