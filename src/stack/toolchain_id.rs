crate::define_id_enum! {
    /// Front-end toolchain recognized by the classifier
    ToolchainId {
        Static => "static" : "Plain static HTML",
        ReactCra => "react-cra" : "React (Create React App)",
        ReactVite => "react-vite" : "React (Vite)",
        VueVite => "vue-vite" : "Vue 3 (Vite)",
        Angular => "angular" : "Angular",
        SvelteVite => "svelte-vite" : "Svelte (Vite)",
        SvelteKit => "sveltekit" : "SvelteKit (static adapter)",
        NextJs => "nextjs" : "Next.js (static export)",
        Astro => "astro" : "Astro",
        VanillaVite => "vanilla-vite" : "Vanilla Vite",
        Jekyll => "jekyll" : "Jekyll",
        Hugo => "hugo" : "Hugo",
    }
}

const VITE_CONFIGS: &[&str] = &[
    "vite.config.ts",
    "vite.config.js",
    "vite.config.mts",
    "vite.config.mjs",
];

/// Hugo marker files; either one's presence identifies a Hugo site
pub const HUGO_CONFIGS: &[&str] = &["hugo.toml", "config.toml"];

impl ToolchainId {
    /// Stable case label. Sub-variants of one family share a number and differ
    /// by letter suffix.
    pub fn case_label(&self) -> &'static str {
        match self {
            ToolchainId::Static => "1",
            ToolchainId::ReactCra => "2",
            ToolchainId::ReactVite => "3",
            ToolchainId::VueVite => "4",
            ToolchainId::Angular => "5",
            ToolchainId::SvelteVite => "6a",
            ToolchainId::SvelteKit => "6b",
            ToolchainId::NextJs => "7",
            ToolchainId::Astro => "8",
            ToolchainId::VanillaVite => "9",
            ToolchainId::Jekyll => "10",
            ToolchainId::Hugo => "12",
        }
    }

    pub fn output_dir(&self) -> &'static str {
        match self {
            ToolchainId::Static => ".",
            ToolchainId::ReactCra | ToolchainId::SvelteKit => "build",
            ToolchainId::ReactVite
            | ToolchainId::VueVite
            | ToolchainId::SvelteVite
            | ToolchainId::VanillaVite
            | ToolchainId::Angular
            | ToolchainId::Astro => "dist",
            ToolchainId::NextJs => "out",
            ToolchainId::Jekyll => "_site",
            ToolchainId::Hugo => "public",
        }
    }

    /// Where the base URL has to be configured for this toolchain
    pub fn base_url_note(&self) -> &'static str {
        match self {
            ToolchainId::Static => "Relative URLs work without any config",
            ToolchainId::ReactCra => "Set \"homepage\" field in package.json",
            ToolchainId::ReactVite
            | ToolchainId::VueVite
            | ToolchainId::SvelteVite
            | ToolchainId::VanillaVite => "Set base in vite.config.ts, e.g. base: '/repo-name/'",
            ToolchainId::Angular => "--base-href flag or baseHref in angular.json",
            ToolchainId::SvelteKit => "Set kit.paths.base in svelte.config.js",
            ToolchainId::NextJs => "Set basePath and assetPrefix in next.config.js",
            ToolchainId::Astro => "Set site and base in astro.config.mjs",
            ToolchainId::Jekyll => "Set baseurl in _config.yml",
            ToolchainId::Hugo => {
                "Set baseURL in hugo.toml, e.g. \"https://user.github.io/repo-name/\""
            }
        }
    }

    /// Candidate build-config filenames, first existing one wins
    pub fn config_candidates(&self) -> &'static [&'static str] {
        match self {
            ToolchainId::Static => &[],
            ToolchainId::ReactCra => &["package.json"],
            ToolchainId::ReactVite
            | ToolchainId::VueVite
            | ToolchainId::SvelteVite
            | ToolchainId::VanillaVite => VITE_CONFIGS,
            ToolchainId::Angular => &["angular.json"],
            ToolchainId::SvelteKit => &["svelte.config.js", "svelte.config.ts"],
            ToolchainId::NextJs => &["next.config.js", "next.config.mjs", "next.config.ts"],
            ToolchainId::Astro => &["astro.config.mjs", "astro.config.ts", "astro.config.js"],
            ToolchainId::Jekyll => &["_config.yml"],
            ToolchainId::Hugo => HUGO_CONFIGS,
        }
    }

    /// Client-side routed single-page apps need a 404 fallback document
    pub fn is_spa(&self) -> bool {
        matches!(
            self,
            ToolchainId::ReactCra
                | ToolchainId::ReactVite
                | ToolchainId::VueVite
                | ToolchainId::SvelteVite
                | ToolchainId::VanillaVite
                | ToolchainId::Angular
        )
    }
}
