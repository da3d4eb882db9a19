#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the shape of each section and on recovery: a bad line should produce one
/// clear error and leave the following lines parseable.
mod tests {
    use super::*;

    /// Prefix `body` with a header for module `test`; tabs stand for one indentation level.
    fn file(body: &str) -> String {
        format!(":arf\nmodule test\n---\n{}", body.replace('\t', "        "))
    }

    fn parse_text(text: &str, mode: ParseMode) -> (Module, Diagnostics) {
        let source = Arc::new(SourceText::new("test.arf", "test", text));
        let mut module = Module::new("test", "test");
        let mut diagnostics = Diagnostics::new();
        if let Err(err) = parse_file(&source, &mut module, mode, &mut diagnostics) {
            diagnostics.fatal(&err);
        }
        (module, diagnostics)
    }

    fn parse_body(body: &str) -> (Module, Diagnostics) {
        parse_text(&file(body), ParseMode::Full)
    }

    fn root_statements(module: &Module, function: &str) -> Vec<Statement> {
        module.functions[function].root.statements().cloned().collect()
    }

    // ========================================================================
    // Header
    // ========================================================================

    #[test]
    fn test_parse_header() {
        let text = ":arf\nmodule test\nauthor \"Sasha Koshka\"\nlicense \"GPLv3\"\nrequire \"./io\"\nrequire \"../math\"\n---\n";
        let (module, diagnostics) = parse_text(text, ParseMode::Full);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(module.author, "Sasha Koshka");
        assert_eq!(module.license, "GPLv3");
        assert_eq!(module.requires, vec!["./io", "../math"]);
    }

    #[test]
    fn test_unknown_header_directive_is_a_warning() {
        let (_, diagnostics) = parse_text(":arf\nmodule test\nversion \"1\"\n---\n", ParseMode::Full);
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(diagnostics.error_count(), 0);
        assert!(diagnostics.contains_message("unknown header directive"));
    }

    #[test]
    fn test_indented_header_line_is_an_error() {
        let (_, diagnostics) = parse_text(":arf\n        module test\n---\n", ParseMode::Full);
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("this line should not be indented"));
    }

    #[test]
    fn test_header_without_separator_is_fatal() {
        let source = Arc::new(SourceText::new("test.arf", "test", ":arf\nmodule test\n"));
        let mut module = Module::new("test", "test");
        let mut diagnostics = Diagnostics::new();
        let err = parse_file(&source, &mut module, ParseMode::Full, &mut diagnostics).unwrap_err();
        assert!(matches!(err, FrontendError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_file_with_only_magic_is_empty() {
        let source = Arc::new(SourceText::new("test.arf", "test", ":arf\n\n# nothing here\n"));
        let mut module = Module::new("test", "test");
        let mut diagnostics = Diagnostics::new();
        let err = parse_file(&source, &mut module, ParseMode::Full, &mut diagnostics).unwrap_err();
        assert!(matches!(err, FrontendError::EmptyFile { .. }));
    }

    #[test]
    fn test_header_value_must_be_name_or_string() {
        let (_, diagnostics) = parse_text(":arf\nmodule test\nauthor 5\n---\n", ParseMode::Full);
        assert!(
            diagnostics.contains_message("unexpected integer literal token. expected name or string literal"),
            "{diagnostics:?}"
        );
    }

    // ========================================================================
    // data
    // ========================================================================

    #[test]
    fn test_data_sections() {
        let (module, diagnostics) = parse_body(
            "data rr count:Int 5\ndata rr greeting:String \"hi\"\ndata rw table:{Int 3}\n\t1 2\n\t3\ndata wn handle:Int external\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");

        assert_eq!(module.datas["count"].values, vec![Literal::Integer(5)]);
        assert_eq!(module.datas["greeting"].values, vec![Literal::String("hi".into())]);

        let table = &module.datas["table"];
        assert_eq!(table.ty.to_string(), "{Int 3}");
        assert_eq!(
            table.values,
            vec![Literal::Integer(1), Literal::Integer(2), Literal::Integer(3)]
        );

        let handle = &module.datas["handle"];
        assert!(handle.external);
        assert!(handle.values.is_empty());
        assert_eq!(handle.permissions.to_string(), "wn");
    }

    #[test]
    fn test_duplicate_data_keeps_first() {
        let (module, diagnostics) = parse_body("data rr count:Int 1\ndata rr count:Int 2\n");
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("data section count already exists"));
        assert_eq!(module.datas["count"].values, vec![Literal::Integer(1)]);
    }

    #[test]
    fn test_bad_declaration_reports_expected_kinds() {
        let (module, diagnostics) = parse_body("data rr 5:Int\ndata rr ok:Int\n");
        assert!(
            diagnostics.contains_message("unexpected integer literal token. expected name"),
            "{diagnostics:?}"
        );
        assert!(module.datas.contains_key("ok"));
    }

    #[test]
    fn test_pointer_types_and_qualifiers() {
        let (module, diagnostics) = parse_body("data rw grid:{{Int} 4}:mut\ndata rr odd:Int:const\n");
        assert_eq!(module.datas["grid"].ty.to_string(), "{{Int} 4}:mut");
        assert!(diagnostics.contains_message("unknown type qualifier :const"));
        assert!(!module.datas["odd"].ty.mutable);
    }

    #[test]
    fn test_unknown_section_type() {
        let (module, diagnostics) = parse_body("blah rr thing\n\tstuff\ndata rr thing:Int\n");
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("unknown section type \"blah\""));
        assert!(module.datas.contains_key("thing"));
    }

    // ========================================================================
    // type
    // ========================================================================

    #[test]
    fn test_typedef_members() {
        let (module, diagnostics) =
            parse_body("type rw Point:Obj\n\tdata rw x:Int 0\n\trw y:Int\n\trw x:Int\ndata rr origin:Point\n");
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("member x already exists"));

        let point = &module.typedefs["Point"];
        assert_eq!(point.inherits.to_string(), "Obj");
        let members: Vec<_> = point.members.keys().map(String::as_str).collect();
        assert_eq!(members, vec!["x", "y"]);
        assert_eq!(point.members["x"].values, vec![Literal::Integer(0)]);
        assert!(module.datas.contains_key("origin"));
    }

    #[test]
    fn test_typedef_member_indented_too_far() {
        let (module, diagnostics) = parse_body("type rw Point:Obj\n\t\t\trw x:Int\n\trw y:Int\n");
        assert!(diagnostics.contains_message("this line is indented too far"));
        assert!(module.typedefs["Point"].members.contains_key("y"));
    }

    // ========================================================================
    // func
    // ========================================================================

    #[test]
    fn test_function_head() {
        let (module, diagnostics) = parse_body(
            "type rw Rect:Obj\n\trw width:Int\nfunc rr area\n\t@ rect:{Rect}\n\t> scale:Int 1\n\t< result:Int\n\t---\n\t= result [* rect.width scale]\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");

        let area = &module.functions["area"];
        assert!(area.is_member());
        assert_eq!(area.receiver.as_ref().unwrap().ty.to_string(), "{Rect}");
        assert_eq!(area.inputs["scale"].values, vec![Literal::Integer(1)]);
        assert!(area.outputs["result"].ty.mutable);

        let statements = root_statements(&module, "area");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].command, Command::Operator("=".into()));
        assert!(matches!(statements[0].arguments[1].kind, ArgumentKind::Statement(_)));
    }

    #[test]
    fn test_mutable_input_is_rejected() {
        let (module, diagnostics) = parse_body("func rr f\n\t> x:Int:mut\n\t> y:Int\n");
        assert!(diagnostics.contains_message("function arguments cannot be mutable"));
        let inputs: Vec<_> = module.functions["f"].inputs.keys().cloned().collect();
        assert_eq!(inputs, vec!["y"]);
    }

    #[test]
    fn test_mutable_output_is_a_warning() {
        let (module, diagnostics) = parse_body("func rr f\n\t< x:Int:mut\n");
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(diagnostics.error_count(), 0);
        assert!(module.functions["f"].outputs["x"].ty.mutable);
    }

    #[test]
    fn test_receiver_rules() {
        let (module, diagnostics) = parse_body("func rr f\n\t@ this:Rect\nfunc rr g\n\t@ this:{Rect}:mut\n");
        assert!(diagnostics.contains_message("method receiver must be a pointer"));
        assert!(diagnostics.contains_message("method receiver cannot be mutable"));
        assert!(!module.functions["f"].is_member());
        assert!(!module.functions["g"].is_member());
    }

    #[test]
    fn test_unknown_head_symbol() {
        let (module, diagnostics) = parse_body("func rr f\n\t% x:Int\n\t> y:Int\n");
        assert!(diagnostics.contains_message("unknown argument type symbol '%', use either '@', '>', or '<'"));
        assert!(module.functions["f"].inputs.contains_key("y"));
    }

    #[test]
    fn test_function_without_head_or_body() {
        let (module, diagnostics) = parse_body("func rr noop\nfunc rw other\n");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(module.functions.len(), 2);
        assert!(module.functions["noop"].root.items.is_empty());
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_statement_forms() {
        let (module, diagnostics) = parse_body(
            "func rr main\n\t---\n\tprint \"hello\"\n\t[\"puts\" 'c' -1 2.5]\n\t[define x:Int 5]\n\t\t[++ x]\n\t[print {x} {buffer 4}]\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");

        let root = &module.functions["main"].root;
        assert_eq!(root.items.len(), 5);
        assert!(root.variables.contains_key("x"));

        let statements: Vec<_> = root.statements().collect();
        assert_eq!(statements[0].arguments[0].kind, ArgumentKind::String("hello".into()));
        assert_eq!(statements[1].command, Command::External("puts".into()));
        let literals: Vec<_> = statements[1].arguments.iter().map(|a| a.kind.clone()).collect();
        assert_eq!(
            literals,
            vec![
                ArgumentKind::Rune('c'),
                ArgumentKind::SignedInteger(-1),
                ArgumentKind::Float(2.5)
            ]
        );
        assert!(matches!(
            &statements[2].arguments[0].kind,
            ArgumentKind::Definition(Definition { name, .. }) if name == "x"
        ));

        let BlockItem::Block(child) = &root.items[3] else {
            panic!("expected a nested block, got {:?}", root.items[3]);
        };
        assert_eq!(child.statements().count(), 1);

        let offsets: Vec<_> = statements[3]
            .arguments
            .iter()
            .map(|argument| match &argument.kind {
                ArgumentKind::Dereference(dereference) => dereference.offset,
                other => panic!("expected a dereference, got {other:?}"),
            })
            .collect();
        assert_eq!(offsets, vec![1, 4]);
    }

    #[test]
    fn test_multiline_bracketed_statement() {
        let (module, diagnostics) = parse_body("func rr main\n\t---\n\t[print 1\n\t\t2\n\t\t3]\n\t[done]\n");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let statements = root_statements(&module, "main");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].arguments.len(), 3);
    }

    #[test]
    fn test_redefinition_in_same_block() {
        let (_, diagnostics) = parse_body("func rr main\n\t---\n\t[let x:Int]\n\t[let x:Int]\n");
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("variable x already exists"));
    }

    #[test]
    fn test_definition_must_follow_a_plain_identifier() {
        let (_, diagnostics) = parse_body("func rr main\n\t---\n\t[let 5:Int]\n\t[let a.b:Int]\n\t[let :Int]\n");
        assert_eq!(diagnostics.error_count(), 3, "{diagnostics:?}");
        assert!(diagnostics.contains_message("type specifier may only follow an identifier"));
        assert!(diagnostics.contains_message("cannot use member selection in definition, name cannot have dots in it"));
    }

    #[test]
    fn test_line_indented_too_far_in_body() {
        let (module, diagnostics) = parse_body("func rr main\n\t---\n\tfirst\n\t\t\tsecond\n\tthird\n");
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("this line is indented too far"));
        assert_eq!(root_statements(&module, "main").len(), 2);
    }

    #[test]
    fn test_malformed_call_does_not_stop_the_next_statement() {
        let (module, diagnostics) = parse_body("func rr main\n\t---\n\t[print [add 1 ---]]\n\t[next]\n");
        assert_eq!(diagnostics.error_count(), 1, "{diagnostics:?}");
        let statements = root_statements(&module, "main");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].command.to_string(), "next");
    }

    #[test]
    fn test_unclosed_bracket_recovery_stops_at_outer_line() {
        let (module, diagnostics) =
            parse_body("func rr main\n\t---\n\t[print 1 :\n\t\t2 3\nfunc rr other\n\t---\n\t[ok]\n");
        assert!(diagnostics.has_errors());
        assert_eq!(root_statements(&module, "other").len(), 1);
    }

    #[test]
    fn test_missing_close_bracket_stops_at_next_section() {
        let (module, diagnostics) =
            parse_body("func rr main\n\t---\n\t[print 1\nfunc rr other\n\t---\n\t[ok]\ndata rr last:Int 1\n");
        let names: Vec<_> = module.functions.keys().cloned().collect();
        assert_eq!(names, ["main", "other"]);
        assert!(root_statements(&module, "main").is_empty());
        assert_eq!(root_statements(&module, "other").len(), 1);
        assert!(module.datas.contains_key("last"));

        assert_eq!(diagnostics.error_count(), 1, "{diagnostics:?}");
        let error = diagnostics.iter().next().unwrap();
        assert_eq!(error.message, "missing `]` at end of statement");
        assert_eq!(error.notes, ["the statement starts on line 6"]);
    }

    #[test]
    fn test_missing_close_bracket_in_nested_block() {
        let (module, diagnostics) =
            parse_body("func rr main\n\t---\n\t[first]\n\t\t[print [add 1\n\t[done]\n");
        assert_eq!(diagnostics.error_count(), 1, "{diagnostics:?}");
        assert!(diagnostics.contains_message("missing `]`"));
        assert_eq!(root_statements(&module, "main").len(), 2);
    }

    #[test]
    fn test_trailing_token_after_statement() {
        let (module, diagnostics) = parse_body("func rr main\n\t---\n\t[print 1] 2\n");
        assert!(diagnostics.contains_message("unexpected integer literal token. expected end of line"));
        assert_eq!(root_statements(&module, "main").len(), 1);
    }

    // ========================================================================
    // Skim mode
    // ========================================================================

    #[test]
    fn test_skim_mode_reads_only_section_heads() {
        let text = file(
            "data rr table:{Int 2}\n\t1 2\ntype rw Point:Obj\n\trw x:Int\nfunc rr main\n\t> y:Int\n\t---\n\t[print y]\n",
        );
        let (module, diagnostics) = parse_text(&text, ParseMode::Skim);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert!(module.datas["table"].values.is_empty());
        assert!(module.typedefs["Point"].members.is_empty());
        let main = &module.functions["main"];
        assert!(main.inputs.is_empty());
        assert!(main.root.items.is_empty());
    }
}
