//! Syntax style identifiers.

pub const NONE: &str = "text/plain";
pub const ACTIONSCRIPT: &str = "text/actionscript";
pub const ASSEMBLER_X86: &str = "text/asm";
pub const BATCH: &str = "text/bat";
pub const C: &str = "text/c";
pub const CLOJURE: &str = "text/clojure";
pub const CPLUSPLUS: &str = "text/cpp";
pub const CSHARP: &str = "text/cs";
pub const CSS: &str = "text/css";
pub const D: &str = "text/d";
pub const DART: &str = "text/dart";
pub const DELPHI: &str = "text/delphi";
pub const DOCKERFILE: &str = "text/dockerfile";
pub const FORTRAN: &str = "text/fortran";
pub const GO: &str = "text/golang";
pub const GROOVY: &str = "text/groovy";
pub const HTML: &str = "text/html";
pub const INI: &str = "text/ini";
pub const JAVA: &str = "text/java";
pub const JAVASCRIPT: &str = "text/javascript";
pub const JSON: &str = "text/json";
pub const JSP: &str = "text/jsp";
pub const KOTLIN: &str = "text/kotlin";
pub const LATEX: &str = "text/latex";
pub const LISP: &str = "text/lisp";
pub const LUA: &str = "text/lua";
pub const MAKEFILE: &str = "text/makefile";
pub const MARKDOWN: &str = "text/markdown";
pub const PERL: &str = "text/perl";
pub const PHP: &str = "text/php";
pub const PROPERTIES: &str = "text/properties";
pub const PYTHON: &str = "text/python";
pub const RUBY: &str = "text/ruby";
pub const RUST: &str = "text/rust";
pub const SCALA: &str = "text/scala";
pub const SQL: &str = "text/sql";
pub const TCL: &str = "text/tcl";
pub const TYPESCRIPT: &str = "text/typescript";
pub const UNIX_SHELL: &str = "text/unix";
pub const VISUAL_BASIC: &str = "text/vb";
pub const XML: &str = "text/xml";
pub const YAML: &str = "text/yaml";

/// Built-in filters, in lookup order.
pub(crate) const DEFAULT_FILTERS: &[(&str, &str)] = &[
    (ACTIONSCRIPT, "*.as *.asc"),
    (ASSEMBLER_X86, "*.asm"),
    (BATCH, "*.bat *.cmd"),
    (C, "*.c"),
    (CLOJURE, "*.clj *.cljs *.cljc"),
    (CPLUSPLUS, "*.cpp *.cxx *.cc *.h *.hpp *.hxx"),
    (CSHARP, "*.cs"),
    (CSS, "*.css"),
    (D, "*.d"),
    (DART, "*.dart"),
    (DELPHI, "*.pas"),
    (DOCKERFILE, "Dockerfile *.dockerfile"),
    (FORTRAN, "*.f *.for *.fort *.f77 *.f90"),
    (GO, "*.go"),
    (GROOVY, "*.groovy *.grv *.gradle"),
    (HTML, "*.htm *.html"),
    (INI, "*.ini *.inf"),
    (JAVA, "*.java"),
    (JAVASCRIPT, "*.js *.mjs"),
    (JSON, "*.json"),
    (JSP, "*.jsp"),
    (KOTLIN, "*.kt *.kts"),
    (LATEX, "*.tex *.sty"),
    (LISP, "*.cl *.lisp *.el"),
    (LUA, "*.lua"),
    (MAKEFILE, "Makefile makefile GNUmakefile *.mk"),
    (MARKDOWN, "*.md *.markdown"),
    (PERL, "*.pl *.perl *.pm"),
    (PHP, "*.php *.phtml"),
    (PROPERTIES, "*.properties"),
    (PYTHON, "*.py *.pyw"),
    (RUBY, "*.rb Rakefile Gemfile"),
    (RUST, "*.rs"),
    (SCALA, "*.scala"),
    (SQL, "*.sql"),
    (TCL, "*.tcl"),
    (TYPESCRIPT, "*.ts *.tsx"),
    (UNIX_SHELL, "*.sh *.bash *.zsh *.ksh *.csh"),
    (VISUAL_BASIC, "*.vb *.vbs"),
    (XML, "*.xml *.xsl *.xslt *.xsd *.svg *.pom"),
    (YAML, "*.yml *.yaml"),
];
