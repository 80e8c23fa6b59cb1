//! Tests for fact-table readers.

use std::fs;
use std::path::Path;

use nullsafe_analysis::facts::{read_errors, FieldRegistry, MethodRegistry, ModuleInfo};
use nullsafe_analysis::model::{Location, Region};
use nullsafe_core::constants::{
    ERRORS_FILE, FIELD_DECLARATIONS_FILE, METHOD_INFO_FILE, METHOD_USAGE_FILE,
};
use nullsafe_core::errors::FactError;

const ANNOTATION: &str = "javax.annotation.Nullable";

const METHOD_INFO: &str = "id\tclass\tmethod\tparent\tsize\tflags\tnullable\tvisibility\tnon-primitive\tpath
1\tcom.a.Base\tget()\t0\t0\t[]\tfalse\tpublic\ttrue\tfile:///src/Base.java
2\tcom.a.Sub\tget()\t1\t0\t[]\tfalse\tpublic\ttrue\tfile:///src/Sub.java
3\tcom.a.Sub\tSub(java.lang.Object)\t0\t1\t[false]\tfalse\tpublic\tfalse\t/src/Sub.java
4\tcom.a.Sub\tcount(int,java.lang.Object)\t0\t2\t[false, true]\tfalse\tprivate\tfalse\tnull
";

const FIELD_DECLARATIONS: &str = "class\tvariables\tinitialized\tpath
com.a.Sub\tfirst,second\tfalse\t/src/Sub.java
";

const METHOD_USAGES: &str = "class\tmethod\tmember\tused_class\tsource
com.b.Client\trun()\tget()\tcom.a.Base\tSOURCE
";

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// DECLARATIONS AND USAGES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn module_loads_every_table() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), METHOD_INFO_FILE, METHOD_INFO);
    write(dir.path(), FIELD_DECLARATIONS_FILE, FIELD_DECLARATIONS);
    write(dir.path(), METHOD_USAGE_FILE, METHOD_USAGES);

    let module = ModuleInfo::load("target", &[dir.path().to_path_buf()]).unwrap();
    assert_eq!(module.methods.len(), 4);
    assert_eq!(module.fields.len(), 1);
    assert_eq!(module.method_usages.len(), 1);
    assert!(module.field_usages.is_empty());

    let sub = module.methods.find("com.a.Sub", "get()").unwrap();
    assert_eq!(
        module.methods.closest_super_method(&sub.class, &sub.signature).unwrap().id,
        1
    );
    assert_eq!(module.methods.constructors_of("com.a.Sub").len(), 1);
    assert_eq!(
        module.methods.path_of_class("com.a.Sub").unwrap(),
        Path::new("/src/Sub.java")
    );

    let count = module.methods.find("com.a.Sub", "count(int,java.lang.Object)").unwrap();
    assert_eq!(count.nullable_params, vec![false, true]);
    assert!(count.path.is_none());

    let public: Vec<u32> = module
        .methods
        .public_methods_with_non_primitive_return()
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(public, vec![1, 2]);
    assert_eq!(
        module.method_usages.regions_using("com.a.Base", "get()").into_iter().collect::<Vec<_>>(),
        vec![Region::new("com.b.Client", "run()")]
    );
}

#[test]
fn sub_methods_follow_the_hierarchy() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), METHOD_INFO_FILE, METHOD_INFO);
    let methods = MethodRegistry::load(&[dir.path().to_path_buf()], METHOD_INFO_FILE).unwrap();

    let subs: Vec<u32> = methods
        .sub_methods("com.a.Base", "get()", true)
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(subs, vec![2]);
    assert!(methods.declares(&Location::method("com.a.Sub", "other()")));
    assert!(!methods.declares(&Location::method("com.z.Other", "get()")));
}

#[test]
fn missing_declaration_tables_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    let module = ModuleInfo::load("target", &[dir.path().to_path_buf()]).unwrap();
    assert!(module.methods.is_empty());
    assert!(module.fields.is_empty());
    assert!(module.field_usages.is_empty());
}

#[test]
fn malformed_row_reports_its_line() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        METHOD_INFO_FILE,
        "header\n1\tA\tf()\t0\t0\t[]\tfalse\tpublic\ttrue\tnull\n\n2\tA\tg()\n",
    );
    let err = MethodRegistry::load(&[dir.path().to_path_buf()], METHOD_INFO_FILE).unwrap_err();
    match err {
        FactError::Malformed { line, .. } => assert_eq!(line, 4),
        other => panic!("unexpected error: {other}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTED ERRORS
// ═══════════════════════════════════════════════════════════════════════════

const ERRORS: &str = "kind\tmessage\tclass\tmember\toffset\tpath\tloc-kind\tloc-class\tloc-method\tloc-variable\tloc-index\tloc-path
RETURN_NULLABLE\treturning null\tcom.a.Base\tget()\t120\tfile:///src/Base.java\tMETHOD\tcom.a.Base\tget()\tnull\tnull\tfile:///src/Base.java
PASS_NULLABLE\tpassing null\tcom.b.Client\trun()\t44\tnull\tPARAMETER\tcom.a.Sub\tSub(java.lang.Object)\tnull\t0\tnull
ASSIGN_FIELD_NULLABLE\tassigning null\tcom.a.Sub\tnull\t10\tnull\tFIELD\tcom.a.Sub\tnull\tsecond\tnull\tnull
DEREFERENCED_EXPRESSION_NULLABLE\tdereferenced\tcom.b.Client\trun()\t50\tnull\tnull\tnull\tnull\tnull\tnull\tnull
";

#[test]
fn errors_carry_their_resolving_candidates() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ERRORS_FILE, ERRORS);
    write(dir.path(), FIELD_DECLARATIONS_FILE, FIELD_DECLARATIONS);
    let fields = FieldRegistry::load(&[dir.path().to_path_buf()], FIELD_DECLARATIONS_FILE).unwrap();

    let errors = read_errors(&dir.path().join(ERRORS_FILE), ANNOTATION, &fields).unwrap();
    assert_eq!(errors.len(), 4);

    let ret = &errors[0];
    assert_eq!(ret.offset, 120);
    assert_eq!(ret.single_resolving_location(), Some(&Location::method("com.a.Base", "get()")));
    let fix = ret.resolving_fixes.iter().next().unwrap();
    assert_eq!(fix.origin, "RETURN_NULLABLE");
    assert_eq!(fix.path.as_deref(), Some(Path::new("/src/Base.java")));

    assert_eq!(
        errors[1].single_resolving_location(),
        Some(&Location::parameter("com.a.Sub", "Sub(java.lang.Object)", 0))
    );
    assert_eq!(
        errors[2].single_resolving_location(),
        Some(&Location::field("com.a.Sub", ["first", "second"]))
    );
    assert_eq!(errors[2].region, Region::init_block("com.a.Sub"));
    assert!(errors[3].resolving_fixes.is_empty());
}

#[test]
fn missing_errors_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_errors(&dir.path().join(ERRORS_FILE), ANNOTATION, &FieldRegistry::new()).unwrap_err();
    assert!(matches!(err, FactError::MissingFile { .. }));
}

#[test]
fn unknown_location_kind_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        ERRORS_FILE,
        "header\nK\tm\tA\tf()\t0\tnull\tLOCAL\tA\tf()\tnull\tnull\tnull\n",
    );
    let err = read_errors(&dir.path().join(ERRORS_FILE), ANNOTATION, &FieldRegistry::new()).unwrap_err();
    assert!(matches!(err, FactError::Malformed { line: 2, .. }));
}
