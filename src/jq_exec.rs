use anyhow::{anyhow, Result};
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run a jq filter over one descriptor document; every output becomes a
/// document of its own.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| stage_errors("parse", errs))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| stage_errors("compile", errs))?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::<Value>::new();
    for item in outputs {
        let v = item.map_err(|e| anyhow!("{e:?}"))?;
        // Val renders as JSON text
        out.push(serde_json::from_str(&v.to_string())?);
    }
    Ok(out)
}

/// One line per failing file; `stage` names the jq phase that rejected it.
fn stage_errors<E: std::fmt::Debug>(stage: &str, errs: Vec<(load::File<&str, ()>, E)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .map(|(file, err)| format!("jq {stage} error in `{}`: {err:?}", file.code))
        .collect();
    anyhow!(lines.join("\n"))
}
