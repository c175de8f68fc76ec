use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::{env, fs};

const CASES_PATH: &str = "tests/check_cases/";
const CASES_WRITE: &str = "tests/integ_test_cases.rs";

fn main() -> Result<(), String> {
    println!("cargo::rerun-if-changed={CASES_PATH}");
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_integ_test_cases(&out_dir)?;

    Ok(())
}

fn generate_integ_test_cases(out_dir: &str) -> Result<(), String> {
    let mut case_files = Vec::new();
    for entry in fs::read_dir(CASES_PATH).map_err(|e| format!("{CASES_PATH}: {e}"))? {
        let entry = entry.map_err(|e| e.to_string())?;
        if !entry.file_type().map_err(|e| e.to_string())?.is_file() {
            return Err(format!("{}: not a regular file", entry.path().to_string_lossy()));
        }
        case_files.push(entry.path());
    }
    case_files.sort();

    let mut out = String::new();
    for path in case_files {
        let path_lossy = path.to_string_lossy().to_string();
        let contents = fs::read_to_string(&path).map_err(|e| format!("{path_lossy}: {e}"))?;
        let spec: TestSpecFile = toml::from_str(&contents).map_err(|e| format!("{path_lossy}: {e}"))?;
        let mod_name = path
            .file_stem()
            .ok_or_else(|| format!("{path_lossy}: no file stem"))?
            .to_string_lossy()
            .to_string();
        write_mod(&mut out, &mod_name, &spec);
    }

    let out_path = Path::new(out_dir).join(CASES_WRITE);
    fs::create_dir_all(out_path.parent().expect("no parent dir found"))
        .map_err(|e| format!("mkdirs on {}: {e}", out_path.to_string_lossy()))?;
    fs::write(&out_path, out).map_err(|e| format!("writing to {}: {e}", out_path.to_string_lossy()))?;

    Ok(())
}

fn write_mod(out: &mut String, mod_name: &str, spec: &TestSpecFile) {
    out.push_str(&format!("mod {mod_name} {{\n"));
    out.push_str("    use super::*;\n\n");

    out.push_str("    const NODE: &str = indoc::indoc! {r#\"\n");
    for line in spec.given.node.trim().split('\n') {
        out.push_str(&format!("        {line}\n"));
    }
    out.push_str("    \"#};\n\n");

    let files = spec.given.files.as_ref();
    let files_count = files.map(BTreeMap::len).unwrap_or(0);
    out.push_str(&format!("    const FILES: [(&str, &str); {files_count}] = [\n"));
    if let Some(files) = files {
        for (name, contents) in files {
            out.push_str(&format!("        ({name:?}, {contents:?}),\n"));
        }
    }
    out.push_str("    ];\n");

    for (case_name, expect) in &spec.expect {
        let fn_name = case_name.replace([' ', '-'], "_");
        out.push_str("\n    #[test]\n");
        out.push_str(&format!("    fn {fn_name}() {{\n"));
        out.push_str("        Case {\n");
        let args: Vec<String> = expect.cli_args.iter().map(|arg| format!("{arg:?}")).collect();
        out.push_str(&format!("            cli_args: &[{}],\n", args.join(", ")));
        out.push_str("            node: NODE,\n");
        out.push_str("            files: &FILES,\n");
        out.push_str(&format!(
            "            expect_output: {:?},\n",
            terminated(expect.output.as_deref())
        ));
        out.push_str(&format!(
            "            expect_error: {:?},\n",
            terminated(expect.output_err.as_deref())
        ));
        out.push_str(&format!(
            "            expect_success: {},\n",
            expect.expect_success.unwrap_or(true)
        ));
        out.push_str("        }\n");
        out.push_str("        .check();\n");
        out.push_str("    }\n");
    }

    out.push_str("}\n\n");
}

/// Expected streams are written line by line, so they always end with a newline; the TOML may omit the final one.
fn terminated(text: Option<&str>) -> String {
    match text {
        None | Some("") => String::new(),
        Some(text) if text.ends_with('\n') => text.to_string(),
        Some(text) => format!("{text}\n"),
    }
}

#[derive(Deserialize)]
struct TestSpecFile {
    given: TestGiven,
    expect: BTreeMap<String, TestExpect>,
}

#[derive(Deserialize)]
struct TestGiven {
    node: String,
    files: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct TestExpect {
    cli_args: Vec<String>,
    output: Option<String>,
    output_err: Option<String>,
    expect_success: Option<bool>,
}
