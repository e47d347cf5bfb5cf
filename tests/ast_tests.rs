// AST construction tests, compared through the canonical text rendering

use oplang::parser::ast::*;
use oplang::{parse_source, FrontendError};

fn ast(source: &str) -> String {
    match parse_source(source) {
        Ok(program) => program.to_string(),
        Err(err) => panic!("{} failed to parse: {}", source, err),
    }
}

/// Wraps a method body rendering in the enclosing `TestClass`/`main` scaffolding
fn in_main(body: &str) -> String {
    format!(
        "Program([ClassDecl(TestClass, [MethodDecl(PrimitiveType(void) main([]), {})])])",
        body
    )
}

#[test]
fn test_attribute_declaration() {
    let source = "class TestClass {
        int x;
    }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [AttributeDecl(PrimitiveType(int), [Attribute(x)])])])"
    );
}

#[test]
fn test_empty_method() {
    let source = "class TestClass {
        void main() {
        }
    }";
    assert_eq!(ast(source), in_main("BlockStatement(stmts=[])"));
}

#[test]
fn test_constructor() {
    let source = "class TestClass {
        int x;
        TestClass(int x) {
            this.x := x;
        }
    }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [AttributeDecl(PrimitiveType(int), [Attribute(x)]), ConstructorDecl(TestClass([Parameter(PrimitiveType(int) x)]), BlockStatement(stmts=[AssignmentStatement(PostfixLHS(PostfixExpression(ThisExpression(this).x)) := Identifier(x))]))])])"
    );
}

#[test]
fn test_inheritance() {
    let source = "class Child extends Parent {
        int y;
    }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(Child, extends Parent, [AttributeDecl(PrimitiveType(int), [Attribute(y)])])])"
    );
}

#[test]
fn test_static_and_final_attributes() {
    let source = "class TestClass {
        static final int MAX_SIZE := 100;
        final float PI := 3.14;
    }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [AttributeDecl(static final PrimitiveType(int), [Attribute(MAX_SIZE = IntLiteral(100))]), AttributeDecl(final PrimitiveType(float), [Attribute(PI = FloatLiteral(3.14))])])])"
    );
}

#[test]
fn test_if_else() {
    let expected = in_main(
        "BlockStatement(stmts=[IfStatement(if BinaryOp(Identifier(x), >, IntLiteral(0)) then BlockStatement(stmts=[ReturnStatement(return Identifier(x))]), else BlockStatement(stmts=[ReturnStatement(return IntLiteral(0))]))])",
    );

    let bare = "class TestClass { void main() { if x > 0 then { return x; } else { return 0; } } }";
    assert_eq!(ast(bare), expected);

    // The condition's own parentheses do not show up in the tree
    let wrapped = "class TestClass {
        void main() {
            if (x > 0) then {
                return x;
            } else {
                return 0;
            }
        }
    }";
    assert_eq!(ast(wrapped), expected);
}

#[test]
fn test_for_loop() {
    let source = "class TestClass {
        void main() {
            for i := 1 to 10 do {
                io.writeIntLn(i);
            }
        }
    }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(stmts=[ForStatement(for i := IntLiteral(1) to IntLiteral(10) do BlockStatement(stmts=[MethodInvocationStatement(StaticMethodInvocation(io.writeIntLn(Identifier(i))))]))])")
    );
}

#[test]
fn test_array_declaration_and_store() {
    let source = "class TestClass { int[5] arr; void main(){ arr[0] := 42; } }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [AttributeDecl(ArrayType(PrimitiveType(int)[5]), [Attribute(arr)]), MethodDecl(PrimitiveType(void) main([]), BlockStatement(stmts=[AssignmentStatement(PostfixLHS(PostfixExpression(Identifier(arr)[IntLiteral(0)])) := IntLiteral(42))]))])])"
    );

    let local = "class TestClass {
        void main() {
            int[5] arr;
            arr[0] := 42;
        }
    }";
    assert_eq!(
        ast(local),
        in_main("BlockStatement(vars=[VariableDecl(ArrayType(PrimitiveType(int)[5]), [Variable(arr)])], stmts=[AssignmentStatement(PostfixLHS(PostfixExpression(Identifier(arr)[IntLiteral(0)])) := IntLiteral(42))])")
    );
}

#[test]
fn test_object_creation_and_method_call() {
    let source = "class TestClass {
        void main() {
            Rectangle r := new Rectangle(5.0, 3.0);
            float area := r.getArea();
        }
    }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(vars=[VariableDecl(ClassType(Rectangle), [Variable(r = ObjectCreation(new Rectangle(FloatLiteral(5.0), FloatLiteral(3.0))))]), VariableDecl(PrimitiveType(float), [Variable(area = PostfixExpression(Identifier(r).getArea()))])], stmts=[])")
    );
}

#[test]
fn test_reference_parameters() {
    let source = "class TestClass {
        void swap(int & a; int & b) {
            int temp := a;
            a := b;
            b := temp;
        }
    }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [MethodDecl(PrimitiveType(void) swap([Parameter(ReferenceType(PrimitiveType(int) &) a), Parameter(ReferenceType(PrimitiveType(int) &) b)]), BlockStatement(vars=[VariableDecl(PrimitiveType(int), [Variable(temp = Identifier(a))])], stmts=[AssignmentStatement(IdLHS(a) := Identifier(b)), AssignmentStatement(IdLHS(b) := Identifier(temp))]))])])"
    );
}

#[test]
fn test_destructor() {
    let source = "class TestClass {
        ~TestClass() {
            io.writeStrLn(\"Object destroyed\");
        }
    }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [DestructorDecl(~TestClass(), BlockStatement(stmts=[MethodInvocationStatement(StaticMethodInvocation(io.writeStrLn(StringLiteral('Object destroyed'))))]))])])"
    );
}

#[test]
fn test_jumps_and_bare_return() {
    let source = "class TestClass { void main() { for i := 3 downto 1 do { if i == 2 then continue; break; } return; } }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(stmts=[ForStatement(for i := IntLiteral(3) downto IntLiteral(1) do BlockStatement(stmts=[IfStatement(if BinaryOp(Identifier(i), ==, IntLiteral(2)) then ContinueStatement()), BreakStatement()])), ReturnStatement(return NilLiteral(nil))])")
    );
}

#[test]
fn test_expression_shapes() {
    let source = "class TestClass { void main() { x := !(a && b) || -c ^ \"s\" % 2; } }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(stmts=[AssignmentStatement(IdLHS(x) := BinaryOp(UnaryOp(!, ParenthesizedExpression(BinaryOp(Identifier(a), &&, Identifier(b)))), ||, BinaryOp(BinaryOp(UnaryOp(-, Identifier(c)), ^, StringLiteral('s')), %, IntLiteral(2))))])")
    );
}

#[test]
fn test_instance_invocations() {
    let source = "class TestClass { void main() { this.shape.draw(); list.get(0).print(); } }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(stmts=[MethodInvocationStatement(InstanceMethodInvocation(PostfixExpression(ThisExpression(this).shape.draw()))), MethodInvocationStatement(InstanceMethodInvocation(PostfixExpression(Identifier(list).get(IntLiteral(0)).print())))])")
    );
}

#[test]
fn test_literals_and_arrays() {
    let source = "class TestClass { final boolean[2] flags := {true, false}; string s := \"a\\tb\"; Node n := nil; }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(TestClass, [AttributeDecl(final ArrayType(PrimitiveType(boolean)[2]), [Attribute(flags = ArrayLiteral({BoolLiteral(true), BoolLiteral(false)}))]), AttributeDecl(PrimitiveType(string), [Attribute(s = StringLiteral('a\\tb'))]), AttributeDecl(ClassType(Node), [Attribute(n = NilLiteral(nil))])])])"
    );
}

#[test]
fn test_forward_declarations() {
    let source = "class A { A(int x); ~A(); static int count(); helper(); }";
    assert_eq!(
        ast(source),
        "Program([ClassDecl(A, [ConstructorDecl(A([Parameter(PrimitiveType(int) x)])), DestructorDecl(~A()), MethodDecl(static PrimitiveType(int) count([])), MethodDecl(PrimitiveType(void) helper([]))])])"
    );
}

#[test]
fn test_self_call_contraction() {
    let source = "class TestClass { void main() { Shape s := shape; draw(s); } }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(vars=[VariableDecl(ClassType(Shape), [Variable(s = PostfixExpression(Identifier(shape).draw(Identifier(s))))])], stmts=[])")
    );
}

#[test]
fn test_self_call_without_candidate_is_kept() {
    let source = "class TestClass { void main() { int n := n; notify(); } }";
    assert_eq!(
        ast(source),
        in_main("BlockStatement(vars=[VariableDecl(PrimitiveType(int), [Variable(n = Identifier(n))])], stmts=[MethodInvocationStatement(StaticMethodInvocation(notify.notify()))])")
    );
}

#[test]
fn test_member_order_is_preserved() {
    let program = parse_source(
        "class A { int a; void f() {} A() {} ~A() {} float b; static void g() {} }",
    )
    .unwrap();
    let kinds: Vec<&str> = program.classes[0]
        .members
        .iter()
        .map(|m| match m {
            Member::Attribute(_) => "attribute",
            Member::Method(_) => "method",
            Member::Constructor(_) => "constructor",
            Member::Destructor(_) => "destructor",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["attribute", "method", "constructor", "destructor", "attribute", "method"]
    );
}

#[test]
fn test_build_is_deterministic() {
    let source = "class A { int f(int a; int b) { int c := a; g(b); if (a > b) then return a; return c; } }";
    assert_eq!(parse_source(source).unwrap(), parse_source(source).unwrap());
}

#[test]
fn test_errors_are_classified() {
    assert!(matches!(
        parse_source("class A { int x := \"open }"),
        Err(FrontendError::Lex(_))
    ));
    match parse_source("class Test { int x := 1; ") {
        Err(FrontendError::Syntax(err)) => {
            assert_eq!(err.to_string(), "Error on line 1 col 25: <EOF>");
            assert_eq!(err.found, "<EOF>");
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_json_round_trip() {
    let program = parse_source(
        "class Shape extends Base { float area() { return w * h; } Shape(float w) { this.w := w; } }",
    )
    .unwrap();
    let json = serde_json::to_string(&program).unwrap();
    let restored: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, program);
}
