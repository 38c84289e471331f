//! Option sets: fixed-order groups of option primitives.
//!
//! The field order of each set is the order the flags are emitted in, and it mirrors the
//! argument grammar accepted by wkhtmltopdf. Do not reorder fields.
use super::{BoolOption, CliOption, FloatOption, MapOption, SliceOption, StringOption, UIntOption};

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $kind:ident = $flag:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $kind,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $kind::new($flag), )*
                }
            }
        }

        impl $name {
            /// Tokens of every set option, in declaration order.
            pub fn args(&self) -> Vec<String> {
                let mut args = Vec::new();
                $( args.extend(self.$field.args()); )*
                args
            }

            /// Clears every option in the set.
            pub fn unset_all(&mut self) {
                $( self.$field.unset(); )*
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                use serde::ser::SerializeStruct;

                let len = [$( stringify!($field) ),*].len();
                let mut state = serializer.serialize_struct(stringify!($name), len)?;
                $( state.serialize_field(stringify!($field), &self.$field.snapshot())?; )*
                state.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                #[derive(Default, serde::Deserialize)]
                #[serde(default, deny_unknown_fields)]
                struct Stored {
                    $( $field: <$kind as CliOption>::Snapshot, )*
                }

                let stored = Stored::deserialize(deserializer)?;
                let mut set = Self::default();
                $( set.$field.restore(stored.$field); )*
                Ok(set)
            }
        }
    };
}

option_set! {
    /// Options that apply to the whole document.
    pub struct GlobalOptions {
        /// Read and write cookies from and to the supplied cookie jar file
        cookie_jar: StringOption = "cookie-jar",
        /// Number of copies to print into the pdf file (default 1)
        copies: UIntOption = "copies",
        /// Change the dpi explicitly (this has no effect on X11 based systems)
        dpi: UIntOption = "dpi",
        extended_help: BoolOption = "extended-help",
        grayscale: BoolOption = "grayscale",
        help: BoolOption = "help",
        htmldoc: BoolOption = "htmldoc",
        /// When embedding images scale them down to this dpi (default 600)
        image_dpi: UIntOption = "image-dpi",
        /// When jpeg compressing images use this quality (default 94)
        image_quality: UIntOption = "image-quality",
        license: BoolOption = "license",
        low_quality: BoolOption = "lowquality",
        manpage: BoolOption = "manpage",
        margin_bottom: UIntOption = "margin-bottom",
        margin_left: UIntOption = "margin-left",
        margin_right: UIntOption = "margin-right",
        margin_top: UIntOption = "margin-top",
        /// Do not collate when printing multiple copies
        no_collate: BoolOption = "no-collate",
        no_pdf_compression: BoolOption = "no-pdf-compression",
        /// Landscape or Portrait, see [`crate::Orientation`]
        orientation: StringOption = "orientation",
        page_height: UIntOption = "page-height",
        /// A4, Letter, ..., see [`crate::PageSize`]
        page_size: StringOption = "page-size",
        page_width: UIntOption = "page-width",
        quiet: BoolOption = "quiet",
        read_args_from_stdin: BoolOption = "read-args-from-stdin",
        readme: BoolOption = "readme",
        /// Title of the generated pdf (defaults to the title of the first document)
        title: StringOption = "title",
        /// Print version information and exit; useful as a no-op invocation
        version: BoolOption = "version",
    }
}

option_set! {
    /// Options controlling the pdf outline (bookmarks).
    pub struct OutlineOptions {
        dump_default_toc_xsl: BoolOption = "dump-default-toc-xsl",
        dump_outline: StringOption = "dump-outline",
        no_outline: BoolOption = "no-outline",
        /// Depth of the outline (default 4)
        outline_depth: UIntOption = "outline-depth",
    }
}

option_set! {
    /// Options of a single input group (cover, table of contents or page), including its
    /// header and footer options.
    pub struct PageOptions {
        /// Allow the file or files from the specified folder to be loaded
        allow: SliceOption = "allow",
        no_background: BoolOption = "no-background",
        cache_dir: StringOption = "cache-dir",
        checkbox_checked_svg: StringOption = "checkbox-checked-svg",
        checkbox_svg: StringOption = "checkbox-svg",
        /// Additional cookie; the value should be url encoded
        cookie: MapOption = "cookie",
        custom_header: MapOption = "custom-header",
        /// Send --custom-header values with every resource request
        custom_header_propagation: BoolOption = "custom-header-propagation",
        no_custom_header_propagation: BoolOption = "no-custom-header-propagation",
        debug_javascript: BoolOption = "debug-javascript",
        default_header: BoolOption = "default-header",
        encoding: StringOption = "encoding",
        disable_external_links: BoolOption = "disable-external-links",
        enable_forms: BoolOption = "enable-forms",
        no_images: BoolOption = "no-images",
        disable_internal_links: BoolOption = "disable-internal-links",
        disable_javascript: BoolOption = "disable-javascript",
        /// Milliseconds to wait for javascript to finish (default 200)
        javascript_delay: UIntOption = "javascript-delay",
        /// abort, ignore or skip
        load_error_handling: StringOption = "load-error-handling",
        /// abort, ignore or skip
        load_media_error_handling: StringOption = "load-media-error-handling",
        disable_local_file_access: BoolOption = "disable-local-file-access",
        minimum_font_size: UIntOption = "minimum-font-size",
        exclude_from_outline: BoolOption = "exclude-from-outline",
        page_offset: UIntOption = "page-offset",
        password: StringOption = "password",
        enable_plugins: BoolOption = "enable-plugins",
        post: MapOption = "post",
        post_file: MapOption = "post-file",
        print_media_type: BoolOption = "print-media-type",
        proxy: StringOption = "proxy",
        /// Hosts that bypass the proxy
        bypass_proxy_for: SliceOption = "bypass-proxy-for",
        radiobutton_checked_svg: StringOption = "radiobutton-checked-svg",
        radiobutton_svg: StringOption = "radiobutton-svg",
        run_script: SliceOption = "run-script",
        disable_smart_shrinking: BoolOption = "disable-smart-shrinking",
        no_stop_slow_scripts: BoolOption = "no-stop-slow-scripts",
        enable_toc_back_links: BoolOption = "enable-toc-back-links",
        user_style_sheet: StringOption = "user-style-sheet",
        username: StringOption = "username",
        /// Emulated window size, e.g. `1280x1024`
        viewport_size: StringOption = "viewport-size",
        window_status: StringOption = "window-status",
        zoom: FloatOption = "zoom",

        // Header and footer. These trail the page options on the command line.
        footer_center: StringOption = "footer-center",
        footer_font_name: StringOption = "footer-font-name",
        footer_font_size: UIntOption = "footer-font-size",
        footer_html: StringOption = "footer-html",
        footer_left: StringOption = "footer-left",
        footer_line: BoolOption = "footer-line",
        footer_right: StringOption = "footer-right",
        /// Spacing between footer and content in mm
        footer_spacing: FloatOption = "footer-spacing",
        header_center: StringOption = "header-center",
        header_font_name: StringOption = "header-font-name",
        header_font_size: UIntOption = "header-font-size",
        header_html: StringOption = "header-html",
        header_left: StringOption = "header-left",
        header_line: BoolOption = "header-line",
        header_right: StringOption = "header-right",
        /// Spacing between header and content in mm
        header_spacing: FloatOption = "header-spacing",
        /// Replace `[name]` with value in header and footer
        replace: MapOption = "replace",
    }
}

option_set! {
    /// Options specific to the table of contents.
    pub struct TocOptions {
        disable_dotted_lines: BoolOption = "disable-dotted-lines",
        toc_header_text: StringOption = "toc-header-text",
        toc_level_indentation: UIntOption = "toc-level-indentation",
        disable_toc_links: BoolOption = "disable-toc-links",
        /// Font scale factor per heading level
        toc_text_size_shrink: FloatOption = "toc-text-size-shrink",
        xsl_style_sheet: StringOption = "xsl-style-sheet",
    }
}
