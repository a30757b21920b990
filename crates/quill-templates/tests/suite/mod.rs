mod generate;
mod merge_patch;
mod models;

use quill_templates::CodeModel;

pub(crate) fn code_model(json: &str) -> CodeModel {
    CodeModel::from_json(json).expect("code model parses")
}
