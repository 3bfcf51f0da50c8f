//! AST → AT&T assembly emission (spec §4.5), grounded on `gen.cpp`'s
//! `gen_asm_node` walk: every expression leaves its result in `%rax`,
//! binary operators spill their left (or, for order-sensitive ops,
//! right) operand to a stack slot while the other side is evaluated,
//! and comparisons exploit AT&T `cmp`'s reversed operand order.

use crate::frame::FrameLayout;
use indexmap::IndexMap;
use nanoc_ir::WindowsX64Abi;
use nanoc_par::{
    Ast, BinOp, ForNode, FunctionCallNode, FunctionDefNode, IfNode, Node, NodeId, RetType, UnOp,
    VarNode, WhileNode,
};
use nanoc_sem::Resolution;
use nanoc_util::Symbol;
use std::fmt::Write as _;

struct LoopLabels {
    end: String,
    continue_target: String,
}

pub struct CodeGenerator<'a> {
    ast: &'a Ast,
    resolution: &'a Resolution,
    frame: Option<FrameLayout>,
    loops: Vec<LoopLabels>,
    label_counter: u32,
    out: String,
}

impl<'a> CodeGenerator<'a> {
    fn new(ast: &'a Ast, resolution: &'a Resolution) -> Self {
        Self {
            ast,
            resolution,
            frame: None,
            loops: Vec::new(),
            label_counter: 0,
            out: String::new(),
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        self.ast.get(id)
    }

    fn fresh_label(&mut self, prefix: &str) -> String {
        let label = format!("{prefix}_{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.out, "  {}", line.as_ref());
    }

    fn emit_label(&mut self, label: &str) {
        let _ = writeln!(self.out, "{label}:");
    }

    /// `offset(%rsp)` for a frame-resident node, else `name(%rip)` for a
    /// global — a local of the same name always wins (spec §4.5).
    fn location_of(&self, usage_or_decl: NodeId) -> String {
        let decl = self.resolution.declaration_of(usage_or_decl);
        if let Some(frame) = &self.frame {
            if let Some(offset) = frame.offset(decl) {
                return format!("{offset}(%rsp)");
            }
        }
        let var = self.node(decl).as_var().expect("variable declaration");
        format!("{}(%rip)", var.name)
    }

    fn generate_program(&mut self, items: &[NodeId]) {
        let mut globals: IndexMap<Symbol, Option<i64>> = IndexMap::new();
        for &item in items {
            if let Node::FunctionDef(def) = self.node(item) {
                let _ = writeln!(self.out, "  .globl {}", def.name);
            } else if let Node::Var(var) = self.node(item) {
                let value = var.init.map(|init| match self.node(init) {
                    Node::Num(n) => n.value,
                    _ => unreachable!("global initializers are literals by the time codegen runs"),
                });
                match globals.get_mut(&var.name) {
                    Some(slot) if value.is_some() => *slot = value,
                    Some(_) => {}
                    None => {
                        globals.insert(var.name, value);
                    }
                }
            }
        }

        if !globals.is_empty() {
            let _ = writeln!(self.out, "  .data");
            for (name, value) in &globals {
                let _ = writeln!(self.out, "  .globl {name}");
                let _ = writeln!(self.out, "  .p2align 3");
                match value {
                    Some(v) => {
                        let _ = writeln!(self.out, "{name}:\n  .long {v}");
                    }
                    None => {
                        let _ = writeln!(self.out, "{name}:\n  .zero 8");
                    }
                }
            }
            let _ = writeln!(self.out, "  .text");
        }

        for &item in items {
            if let Node::FunctionDef(def) = self.node(item) {
                let def = def.clone();
                self.generate_function(&def);
            }
        }
    }

    fn generate_function(&mut self, def: &FunctionDefNode) {
        let frame = FrameLayout::build(self.ast, &def.params, &def.body);
        let frame_size = WindowsX64Abi::SHADOW_SPACE + 8 * frame.slot_count() as u32;
        self.frame = Some(frame);

        let _ = writeln!(self.out, "{}:", def.name);
        self.emit(format!("sub ${frame_size}, %rsp"));

        for (i, &param) in def.params.iter().enumerate() {
            let reg = WindowsX64Abi::arg_register(i).expect("resolver caps params at 4");
            let location = self.location_of(param);
            self.emit(format!("mov {reg}, {location}"));
        }

        for &stmt in &def.body {
            self.generate_statement(stmt);
        }

        let last_is_return = matches!(def.body.last().map(|&id| self.node(id)), Some(Node::Return(_)));
        if !last_is_return {
            let is_main = def.name.as_str() == "main";
            if is_main {
                self.emit("mov $0, %rax");
            } else if def.return_type != RetType::Void {
                // Falling off a non-`main`, non-`void` function is undefined
                // behavior (spec §4.5's UB note); trap rather than return
                // garbage so it's visible under a debugger.
                self.emit("int $3 # fell off the end of a non-void function");
            }
            self.emit_epilogue(frame_size);
        }

        self.frame = None;
    }

    fn emit_epilogue(&mut self, frame_size: u32) {
        self.emit(format!("add ${frame_size}, %rsp"));
        self.emit("ret");
    }

    fn generate_statement(&mut self, id: NodeId) {
        match self.node(id).clone() {
            Node::Empty(_) => {}
            Node::Block(block) => {
                for item in block.items {
                    self.generate_statement(item);
                }
            }
            Node::Return(r) => {
                if let Some(expr) = r.expr {
                    self.generate_expr(expr);
                }
                let frame_size = WindowsX64Abi::SHADOW_SPACE
                    + 8 * self.frame.as_ref().expect("inside a function body").slot_count() as u32;
                self.emit_epilogue(frame_size);
            }
            Node::Var(var) => self.generate_var(id, &var),
            Node::If(n) => self.generate_if(&n),
            Node::For(n) => self.generate_for(&n),
            Node::While(n) => self.generate_while(&n, false),
            Node::DoWhile(n) => self.generate_while(&n, true),
            Node::Break(_) => {
                let label = self.loops.last().expect("break inside a loop").end.clone();
                self.emit(format!("jmp {label}"));
            }
            Node::Continue(_) => {
                let label = self
                    .loops
                    .last()
                    .expect("continue inside a loop")
                    .continue_target
                    .clone();
                self.emit(format!("jmp {label}"));
            }
            // An expression used as a statement (e.g. a bare call or
            // assignment): evaluate it for its side effect and drop %rax.
            other => self.generate_expr_node(id, &other),
        }
    }

    fn generate_var(&mut self, id: NodeId, var: &VarNode) {
        if var.is_assignment {
            let init = var.init.expect("assignment carries a value expression");
            self.generate_expr(init);
            let location = self.location_of(id);
            self.emit(format!("mov %rax, {location}"));
        } else if var.is_usage {
            let location = self.location_of(id);
            self.emit(format!("mov {location}, %rax"));
        }
        // A bare declaration with no initializer needs no code: its slot
        // already exists in the frame, uninitialized.
    }

    fn generate_if(&mut self, n: &IfNode) {
        self.generate_expr(n.condition);
        self.emit("cmp $0, %rax");
        if let Some(else_branch) = n.else_branch {
            let else_label = self.fresh_label("else");
            let end_label = self.fresh_label("fi");
            self.emit(format!("je {else_label}"));
            self.generate_statement(n.then_branch);
            self.emit(format!("jmp {end_label}"));
            self.emit_label(&else_label);
            self.generate_statement(else_branch);
            self.emit_label(&end_label);
        } else {
            let end_label = self.fresh_label("fi");
            self.emit(format!("je {end_label}"));
            self.generate_statement(n.then_branch);
            self.emit_label(&end_label);
        }
    }

    fn generate_for(&mut self, n: &ForNode) {
        let cond_label = self.fresh_label("for_cond");
        let update_label = self.fresh_label("for_update");
        let end_label = self.fresh_label("for_end");

        if let Some(init) = n.init {
            self.generate_statement(init);
        }

        self.loops.push(LoopLabels {
            end: end_label.clone(),
            continue_target: update_label.clone(),
        });

        self.emit_label(&cond_label);
        if let Some(condition) = n.condition {
            self.generate_expr(condition);
            self.emit("cmp $0, %rax");
            self.emit(format!("je {end_label}"));
        }
        self.generate_statement(n.body);
        self.emit_label(&update_label);
        if let Some(update) = n.update {
            self.generate_statement(update);
        }
        self.emit(format!("jmp {cond_label}"));
        self.emit_label(&end_label);

        self.loops.pop();
    }

    fn generate_while(&mut self, n: &WhileNode, is_do_while: bool) {
        let start_label = self.fresh_label(if is_do_while { "do_while_start" } else { "while" });
        let cond_label = if is_do_while {
            self.fresh_label("do_while_cond")
        } else {
            start_label.clone()
        };
        let end_label = self.fresh_label(if is_do_while { "do_while_end" } else { "while_end" });

        self.loops.push(LoopLabels {
            end: end_label.clone(),
            continue_target: cond_label.clone(),
        });

        self.emit_label(&start_label);
        if is_do_while {
            self.generate_statement(n.body);
            self.emit_label(&cond_label);
            self.generate_expr(n.condition);
            self.emit("cmp $0, %rax");
            self.emit(format!("je {end_label}"));
            self.emit(format!("jmp {start_label}"));
        } else {
            self.generate_expr(n.condition);
            self.emit("cmp $0, %rax");
            self.emit(format!("je {end_label}"));
            self.generate_statement(n.body);
            self.emit(format!("jmp {start_label}"));
        }
        self.emit_label(&end_label);

        self.loops.pop();
    }

    fn generate_expr(&mut self, id: NodeId) {
        let node = self.node(id).clone();
        self.generate_expr_node(id, &node);
    }

    fn generate_expr_node(&mut self, id: NodeId, node: &Node) {
        match node {
            Node::Num(n) => {
                self.emit(format!("mov ${}, %rax", n.value));
            }
            Node::Var(var) => self.generate_var(id, var),
            Node::UnOp(n) => self.generate_unop(n.op, n.operand),
            Node::BinOp(b) => self.generate_binop(id, b.op, b.left, b.right),
            Node::TerOp(n) => self.generate_ternary(n.condition, n.if_true, n.if_false),
            Node::FunctionCall(call) => self.generate_call(call),
            Node::Empty(_) => {}
            other => unreachable!("not a valid expression node: {other:?}"),
        }
    }

    fn generate_unop(&mut self, op: UnOp, operand: NodeId) {
        self.generate_expr(operand);
        match op {
            UnOp::Neg => self.emit("neg %rax"),
            UnOp::BitNot => self.emit("not %rax"),
            UnOp::Not => {
                self.emit("cmp $0, %rax");
                self.emit("mov $0, %rax");
                self.emit("sete %al");
            }
        }
    }

    fn generate_ternary(&mut self, condition: NodeId, if_true: NodeId, if_false: NodeId) {
        let else_label = self.fresh_label("ter_false");
        let end_label = self.fresh_label("ter_end");
        self.generate_expr(condition);
        self.emit("cmp $0, %rax");
        self.emit(format!("je {else_label}"));
        self.generate_expr(if_true);
        self.emit(format!("jmp {end_label}"));
        self.emit_label(&else_label);
        self.generate_expr(if_false);
        self.emit_label(&end_label);
    }

    fn generate_call(&mut self, call: &FunctionCallNode) {
        for (i, &arg) in call.args.iter().enumerate() {
            self.generate_expr(arg);
            let reg = WindowsX64Abi::arg_register(i).expect("resolver caps call arguments at 4");
            self.emit(format!("mov %rax, {reg}"));
        }
        self.emit(format!("callq {}", call.name));
    }

    /// Spill `self`'s slot with the current `%rax`, used by binop
    /// lowering to hold one operand while the other is evaluated.
    fn spill(&mut self, slot_of: NodeId) {
        let location = self
            .frame
            .as_ref()
            .and_then(|f| f.offset(slot_of))
            .expect("binop node was assigned a frame slot");
        self.emit(format!("mov %rax, {location}(%rsp)"));
    }

    fn reload(&mut self, slot_of: NodeId, reg: &str) {
        let location = self
            .frame
            .as_ref()
            .and_then(|f| f.offset(slot_of))
            .expect("binop node was assigned a frame slot");
        self.emit(format!("mov {location}(%rsp), {reg}"));
    }

    fn generate_binop(&mut self, id: NodeId, op: BinOp, left: NodeId, right: NodeId) {
        if op.is_short_circuit() {
            return self.generate_short_circuit(op, left, right);
        }
        if op.is_order_sensitive() {
            self.generate_expr(right);
            self.spill(id);
            self.generate_expr(left);
            self.reload(id, "%rcx");
        } else {
            self.generate_expr(left);
            self.spill(id);
            self.generate_expr(right);
            self.reload(id, "%rcx");
        }

        match op {
            BinOp::Add => self.emit("add %rcx, %rax"),
            BinOp::Mul => self.emit("imul %rcx, %rax"),
            BinOp::Sub => self.emit("sub %rcx, %rax"),
            BinOp::Div | BinOp::Mod => {
                self.emit("xor %rdx, %rdx");
                self.emit("idiv %rcx");
                if op == BinOp::Mod {
                    self.emit("mov %rdx, %rax");
                }
            }
            BinOp::Lt => self.emit_compare("setl"),
            BinOp::Gt => self.emit_compare("setg"),
            BinOp::Le => self.emit_compare("setle"),
            BinOp::Ge => self.emit_compare("setge"),
            BinOp::Eq => self.emit_compare("sete"),
            BinOp::Ne => self.emit_compare("setne"),
            BinOp::And | BinOp::Or => unreachable!("handled by generate_short_circuit"),
        }
    }

    /// AT&T `cmp src, dst` sets flags from `dst - src`; with left in
    /// `%rcx` and right in `%rax` that computes `left - right`, so a
    /// plain `setCC` reads as the source-level comparison directly.
    fn emit_compare(&mut self, set: &str) {
        self.emit("cmp %rax, %rcx");
        self.emit("mov $0, %rax");
        self.emit(format!("{set} %al"));
    }

    fn generate_short_circuit(&mut self, op: BinOp, left: NodeId, right: NodeId) {
        match op {
            BinOp::And => {
                let rhs_label = self.fresh_label("and_rhs");
                let end_label = self.fresh_label("and_end");
                self.generate_expr(left);
                self.emit("cmp $0, %rax");
                self.emit(format!("jne {rhs_label}"));
                self.emit(format!("jmp {end_label}"));
                self.emit_label(&rhs_label);
                self.generate_expr(right);
                self.emit("cmp $0, %rax");
                self.emit("mov $0, %rax");
                self.emit("setne %al");
                self.emit_label(&end_label);
            }
            BinOp::Or => {
                let rhs_label = self.fresh_label("or_rhs");
                let end_label = self.fresh_label("or_end");
                self.generate_expr(left);
                self.emit("cmp $0, %rax");
                self.emit(format!("je {rhs_label}"));
                self.emit("mov $1, %rax");
                self.emit(format!("jmp {end_label}"));
                self.emit_label(&rhs_label);
                self.generate_expr(right);
                self.emit("cmp $0, %rax");
                self.emit("mov $0, %rax");
                self.emit("setne %al");
                self.emit_label(&end_label);
            }
            _ => unreachable!("only && and || short-circuit"),
        }
    }
}

/// Emit AT&T-syntax x86-64 assembly for a resolved translation unit.
pub fn generate(ast: &Ast, resolution: &Resolution) -> String {
    let mut gen = CodeGenerator::new(ast, resolution);
    gen.generate_program(&ast.items);
    gen.out
}
