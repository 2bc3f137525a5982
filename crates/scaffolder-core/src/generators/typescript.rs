//! TypeScript compiler config, tsup build config and root re-export files

use super::manifest::{BUILD_DIR, ROOT_ENTRY, ROOT_ESM_ENTRY, ROOT_TYPES, SOURCE_DIR};
use crate::config::{ModuleFormat, ProjectConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;

/// Output format emitted by the build tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFormat {
    Cjs,
    Esm,
}

impl fmt::Display for BuildFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildFormat::Cjs => write!(f, "cjs"),
            BuildFormat::Esm => write!(f, "esm"),
        }
    }
}

/// Build output formats; dual packages always emit CommonJS first.
pub fn build_formats(format: ModuleFormat) -> Vec<BuildFormat> {
    match format {
        ModuleFormat::CommonJs => vec![BuildFormat::Cjs],
        ModuleFormat::Esm => vec![BuildFormat::Esm],
        ModuleFormat::Dual => vec![BuildFormat::Cjs, BuildFormat::Esm],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    pub compiler_options: CompilerOptions,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target: String,
    pub module: String,
    pub module_resolution: String,
    pub lib: Vec<String>,
    pub strict: bool,
    pub declaration: bool,
    pub declaration_map: bool,
    pub source_map: bool,
    pub out_dir: String,
    pub root_dir: String,
    pub es_module_interop: bool,
    pub skip_lib_check: bool,
    pub force_consistent_casing_in_file_names: bool,
    pub resolve_json_module: bool,
    pub isolated_modules: bool,
}

/// `tsconfig.json` contents as a value.
///
/// CommonJS packages use Node resolution with CommonJS output; ESM and dual
/// packages use bundler resolution with ESNext modules since tsup does the
/// final emit.
pub fn tsconfig(config: &ProjectConfig) -> TsConfig {
    let (module, resolution) = match config.module_format {
        ModuleFormat::CommonJs => ("CommonJS", "Node"),
        ModuleFormat::Esm | ModuleFormat::Dual => ("ESNext", "Bundler"),
    };

    let mut exclude = vec![
        "node_modules".to_string(),
        BUILD_DIR.to_string(),
        "**/*.test.ts".to_string(),
        "**/*.spec.ts".to_string(),
        ROOT_ENTRY.to_string(),
        ROOT_TYPES.to_string(),
    ];
    if config.module_format == ModuleFormat::Dual {
        exclude.push(ROOT_ESM_ENTRY.to_string());
    }

    TsConfig {
        compiler_options: CompilerOptions {
            target: "ES2022".to_string(),
            module: module.to_string(),
            module_resolution: resolution.to_string(),
            lib: vec!["ES2022".to_string()],
            strict: true,
            declaration: true,
            declaration_map: true,
            source_map: true,
            out_dir: BUILD_DIR.to_string(),
            root_dir: SOURCE_DIR.to_string(),
            es_module_interop: true,
            skip_lib_check: true,
            force_consistent_casing_in_file_names: true,
            resolve_json_module: true,
            isolated_modules: true,
        },
        include: vec![SOURCE_DIR.to_string()],
        exclude,
    }
}

pub fn render_tsconfig(config: &ProjectConfig) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&tsconfig(config))
        .context("Failed to serialize tsconfig.json")?;
    json.push('\n');
    Ok(json)
}

/// `tsup.config.ts`
pub fn tsup_config(config: &ProjectConfig) -> String {
    let formats = build_formats(config.module_format)
        .iter()
        .map(|f| format!("'{}'", f))
        .collect::<Vec<_>>()
        .join(", ");

    // Dual output keeps `.js` for CommonJS and moves ESM to `.mjs`. The
    // package is `type: module`, so the build marks `dist/` as CommonJS.
    let dual = config.module_format == ModuleFormat::Dual;
    let (imports, out_extension) = if dual {
        (
            "import { writeFile } from 'node:fs/promises';\n",
            format!(
                "  outExtension({{ format }}) {{\n    return {{ js: format === 'esm' ? '.mjs' : '.js' }};\n  }},\n\
                 \x20 async onSuccess() {{\n\
                 \x20   await writeFile('{dist}/package.json', JSON.stringify({{ type: 'commonjs' }}) + '\\n');\n\
                 \x20 }},\n",
                dist = BUILD_DIR,
            ),
        )
    } else {
        ("", String::new())
    };

    format!(
        "{imports}\
         import {{ defineConfig }} from 'tsup';\n\
         \n\
         export default defineConfig({{\n\
         \x20 entry: ['{src}/index.ts'],\n\
         \x20 format: [{formats}],\n\
         \x20 dts: true,\n\
         \x20 sourcemap: true,\n\
         \x20 clean: true,\n\
         \x20 outDir: '{dist}',\n\
         {out_extension}\
         }});\n",
        src = SOURCE_DIR,
        dist = BUILD_DIR,
        formats = formats,
        imports = imports,
        out_extension = out_extension,
    )
}

/// Root re-export files as `(file name, contents)` pairs
pub fn root_reexports(format: ModuleFormat) -> Vec<(&'static str, String)> {
    let types = format!("export * from './{}/index';\n", BUILD_DIR);
    let cjs = format!("module.exports = require('./{}/index.js');\n", BUILD_DIR);

    match format {
        ModuleFormat::Esm => vec![
            (ROOT_ENTRY, format!("export * from './{}/index.js';\n", BUILD_DIR)),
            (ROOT_TYPES, types),
        ],
        ModuleFormat::CommonJs => vec![(ROOT_ENTRY, cjs), (ROOT_TYPES, types)],
        ModuleFormat::Dual => vec![
            (ROOT_ENTRY, cjs),
            (ROOT_TYPES, types),
            (
                ROOT_ESM_ENTRY,
                format!("export * from './{}/index.mjs';\n", BUILD_DIR),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::default_config;

    fn with_format(format: ModuleFormat) -> ProjectConfig {
        ProjectConfig {
            module_format: format,
            ..default_config()
        }
    }

    #[test]
    fn test_build_formats_cover_each_module_format() {
        for format in [ModuleFormat::Esm, ModuleFormat::CommonJs, ModuleFormat::Dual] {
            let formats = build_formats(format);
            assert_eq!(formats.contains(&BuildFormat::Cjs), format.emits_cjs());
            assert_eq!(formats.contains(&BuildFormat::Esm), format.emits_esm());
        }
        assert_eq!(
            build_formats(ModuleFormat::Dual),
            vec![BuildFormat::Cjs, BuildFormat::Esm]
        );
    }

    #[test]
    fn test_tsconfig_follows_module_format() {
        let cjs = tsconfig(&with_format(ModuleFormat::CommonJs));
        assert_eq!(cjs.compiler_options.module, "CommonJS");
        assert_eq!(cjs.compiler_options.module_resolution, "Node");

        for format in [ModuleFormat::Esm, ModuleFormat::Dual] {
            let esm = tsconfig(&with_format(format));
            assert_eq!(esm.compiler_options.module, "ESNext");
            assert_eq!(esm.compiler_options.module_resolution, "Bundler");
        }
    }

    #[test]
    fn test_tsconfig_excludes_tests_and_root_reexports() {
        let dual = tsconfig(&with_format(ModuleFormat::Dual));
        for path in ["**/*.test.ts", "index.js", "index.d.ts", "index.mjs"] {
            assert!(dual.exclude.iter().any(|p| p == path), "{}", path);
        }
        let esm = tsconfig(&with_format(ModuleFormat::Esm));
        assert!(!esm.exclude.iter().any(|p| p == "index.mjs"));
    }

    #[test]
    fn test_tsconfig_renders_camel_case() {
        let json = render_tsconfig(&default_config()).unwrap();
        assert!(json.contains("\"compilerOptions\""));
        assert!(json.contains("\"moduleResolution\": \"Bundler\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_tsup_config_formats() {
        assert!(tsup_config(&with_format(ModuleFormat::Dual)).contains("format: ['cjs', 'esm'],"));
        assert!(tsup_config(&with_format(ModuleFormat::Esm)).contains("format: ['esm'],"));
        assert!(tsup_config(&with_format(ModuleFormat::CommonJs)).contains("format: ['cjs'],"));
        assert!(tsup_config(&with_format(ModuleFormat::Dual)).contains("'.mjs'"));
        assert!(!tsup_config(&with_format(ModuleFormat::Esm)).contains("outExtension"));
    }

    #[test]
    fn test_dual_build_marks_dist_as_commonjs() {
        let dual = tsup_config(&with_format(ModuleFormat::Dual));
        assert!(dual.starts_with("import { writeFile } from 'node:fs/promises';\n"));
        assert!(dual.contains(
            "  async onSuccess() {\n    await writeFile('dist/package.json', JSON.stringify({ type: 'commonjs' }) + '\\n');\n  },\n"
        ));

        for format in [ModuleFormat::Esm, ModuleFormat::CommonJs] {
            let single = tsup_config(&with_format(format));
            assert!(single.starts_with("import { defineConfig } from 'tsup';"));
            assert!(!single.contains("onSuccess"));
        }
    }

    #[test]
    fn test_root_reexports() {
        let names: Vec<_> = root_reexports(ModuleFormat::Dual)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["index.js", "index.d.ts", "index.mjs"]);

        let esm = root_reexports(ModuleFormat::Esm);
        assert_eq!(esm.len(), 2);
        assert!(esm[0].1.starts_with("export"));

        let cjs = root_reexports(ModuleFormat::CommonJs);
        assert!(cjs[0].1.contains("require('./dist/index.js')"));
    }
}
