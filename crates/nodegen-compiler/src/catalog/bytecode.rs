//! The bytecode generation: instruction set and module members.

use std::sync::LazyLock;

use crate::instr::{Instr, Param, lower_instructions};
use crate::model::{
    DocMode, EqualityMode, FormatMode, HashMode, IntWidth, Member, Tag, UnionSchema, Variant,
};

/// Every instruction in opcode order.
pub static INSTRUCTIONS: LazyLock<Vec<Instr>> = LazyLock::new(instructions);

fn load_constant(name: &str, what: &str) -> Instr {
    Instr::new(name, format!("Load {what} into the target.")).params([Param::local("target")])
}

fn binary(name: &str, expr: &str) -> Instr {
    Instr::new(name, format!("Store {expr} into target.")).params([
        Param::local("lhs"),
        Param::local("rhs"),
        Param::local("target"),
    ])
}

fn unary(name: &str, expr: &str) -> Instr {
    Instr::new(name, format!("Store {expr} into target."))
        .params([Param::local("value"), Param::local("target")])
}

fn container(name: &str, what: &str) -> Instr {
    Instr::new(
        name,
        format!("Construct {what} with the count topmost values\nfrom the stack and store it into target."),
    )
    .params([Param::integer("count", "u32"), Param::local("target")])
}

fn instructions() -> Vec<Instr> {
    vec![
        load_constant("LoadNull", "null"),
        load_constant("LoadFalse", "false"),
        load_constant("LoadTrue", "true"),
        Instr::new("LoadInt", "Load the given integer constant into the target.")
            .params([Param::integer("constant", "i64"), Param::local("target")]),
        Instr::new("LoadFloat", "Load the given floating point constant into the target.")
            .params([Param::float("constant"), Param::local("target")]),
        Instr::new("LoadParam", "Load the given parameter into the target.")
            .params([Param::param("source"), Param::local("target")]),
        Instr::new("StoreParam", "Store the given local into the parameter.")
            .params([Param::local("source"), Param::param("target")]),
        Instr::new("LoadModule", "Load the module variable source into target.")
            .params([Param::module("source"), Param::local("target")]),
        Instr::new("StoreModule", "Store the source local into the target module variable.")
            .params([Param::local("source"), Param::module("target")]),
        Instr::new("LoadMember", "Load `object.name` into target.").params([
            Param::local("object"),
            Param::module("name"),
            Param::local("target"),
        ]),
        Instr::new("StoreMember", "Store source into `object.name`.").params([
            Param::local("source"),
            Param::local("object"),
            Param::module("name"),
        ]),
        Instr::new("LoadTupleMember", "Load `tuple.index` into target.").params([
            Param::local("tuple"),
            Param::integer("index", "u32"),
            Param::local("target"),
        ]),
        Instr::new("StoreTupleMember", "Store source into `tuple.index`.").params([
            Param::local("source"),
            Param::local("tuple"),
            Param::integer("index", "u32"),
        ]),
        Instr::new("LoadIndex", "Load `array[index]` into target.").params([
            Param::local("array"),
            Param::local("index"),
            Param::local("target"),
        ]),
        Instr::new("StoreIndex", "Store source into `array[index]`.").params([
            Param::local("source"),
            Param::local("array"),
            Param::local("index"),
        ]),
        Instr::new(
            "LoadClosure",
            "Load the function's closure environment into the target.",
        )
        .params([Param::local("target")]),
        Instr::new(
            "LoadEnv",
            "Load a value from a closure environment. `level` is the number of parent links to follow\n\
             to reach the target environment (0 is `env` itself). `index` is the index of the value\n\
             in the target environment.",
        )
        .params([
            Param::local("env"),
            Param::integer("level", "u32"),
            Param::integer("index", "u32"),
            Param::local("target"),
        ]),
        Instr::new(
            "StoreEnv",
            "Store a value into a closure environment. Analog to LoadEnv.",
        )
        .params([
            Param::local("source"),
            Param::local("env"),
            Param::integer("level", "u32"),
            Param::integer("index", "u32"),
        ]),
        binary("Add", "lhs + rhs"),
        binary("Sub", "lhs - rhs"),
        binary("Mul", "lhs * rhs"),
        binary("Div", "lhs / rhs"),
        binary("Mod", "lhs % rhs"),
        binary("Pow", "pow(lhs, rhs)"),
        unary("UAdd", "+value"),
        unary("UNeg", "-value"),
        binary("LSh", "lhs << rhs"),
        binary("RSh", "lhs >> rhs"),
        binary("BAnd", "lhs & rhs"),
        binary("BOr", "lhs | rhs"),
        binary("BXor", "lhs ^ rhs"),
        unary("BNot", "~value"),
        binary("Gt", "lhs > rhs"),
        binary("Gte", "lhs >= rhs"),
        binary("Lt", "lhs < rhs"),
        binary("Lte", "lhs <= rhs"),
        binary("Eq", "lhs == rhs"),
        binary("NEq", "lhs != rhs"),
        unary("LNot", "!value"),
        container("Array", "an array"),
        container("Tuple", "a tuple"),
        container("Set", "a set"),
        Instr::new(
            "Map",
            "Construct a map with the count topmost keys and values\n\
             from the stack and store it into target.\n\
             The count must be even.",
        )
        .params([Param::integer("count", "u32"), Param::local("target")]),
        Instr::new(
            "Env",
            "Construct an environment with the given parent and size and\nstore it into target.",
        )
        .params([
            Param::local("parent"),
            Param::integer("size", "u32"),
            Param::local("target"),
        ]),
        Instr::new(
            "Closure",
            "Construct a closure with the given function template and environment and\n\
             store it into target.",
        )
        .params([
            Param::local("template"),
            Param::local("env"),
            Param::local("target"),
        ]),
        Instr::new(
            "Formatter",
            "Construct a new string formatter and store it into target.",
        )
        .params([Param::local("target")]),
        Instr::new("AppendFormat", "Format a value and append it to the formatter.")
            .params([Param::local("value"), Param::local("formatter")]),
        Instr::new("FormatResult", "Store the formatted string into target.")
            .params([Param::local("formatter"), Param::local("target")]),
        Instr::new("Copy", "Copy source to target.")
            .params([Param::local("source"), Param::local("target")]),
        Instr::new("Swap", "Swap the values of the two locals.")
            .params([Param::local("a"), Param::local("b")]),
        Instr::new("Push", "Push value on the stack.").params([Param::local("value")]),
        Instr::new(
            "Pop",
            "Pop the top (written by most recent push) from the stack.",
        ),
        Instr::new(
            "PopTo",
            "Pop the top (written by most recent push) from the stack and store it into target.",
        )
        .params([Param::local("target")]),
        Instr::new("Jmp", "Unconditional jump to the given offset.")
            .params([Param::offset("offset")]),
        Instr::new(
            "JmpTrue",
            "Jump to the given offset if the condition evaluates to true,\n\
             otherwise continue with the next instruction.",
        )
        .params([Param::local("condition"), Param::offset("offset")]),
        Instr::new(
            "JmpFalse",
            "Jump to the given offset if the condition evaluates to false,\n\
             otherwise continue with the next instruction.",
        )
        .params([Param::local("condition"), Param::offset("offset")]),
        Instr::new(
            "Call",
            "Call the given function with the topmost count arguments on the stack.\n\
             After the call, a single return value will be left on the stack.",
        )
        .params([Param::local("function"), Param::integer("count", "u32")]),
        Instr::new(
            "LoadMethod",
            "Load the method called name from the given object.\n\n\
             The appropriate this pointer (possibly null) will be stored into `this`.\n\
             The method handle will be stored into `method`.",
        )
        .params([
            Param::local("object"),
            Param::module("name"),
            Param::local("this"),
            Param::local("method"),
        ]),
        Instr::new(
            "CallMethod",
            "Call the given method on an object with `count` additional arguments on the stack.\n\
             The arguments `this` and `method` must be the results\n\
             of a previously executed LoadMethod instruction.",
        )
        .params([Param::local("method"), Param::integer("count", "u32")]),
        Instr::new("Return", "Returns the value to the calling function.")
            .params([Param::local("value")]),
        Instr::new(
            "AssertFail",
            "Signals an assertion error and aborts the program.\n\
             `expr` should contain the string representation of the failed assertion.\n\
             `message` can hold a user defined error message string or null.",
        )
        .params([Param::local("expr"), Param::local("message")]),
    ]
}

/// `BytecodeInstr`, tagged by `BytecodeOp` starting at 1.
pub fn instruction_union() -> UnionSchema {
    let tag = Tag::new("BytecodeOp", IntWidth::U8)
        .start_value(1)
        .doc("Represents the type of an instruction.");
    lower_instructions("BytecodeInstr", tag, INSTRUCTIONS.iter())
        .doc("Represents a bytecode instruction.")
        .format(FormatMode::Define)
        .doc_mode(DocMode::Tag)
}

/// `BytecodeMember`, the constants and declarations of a compiled module.
pub fn member_union() -> UnionSchema {
    let tag = Tag::new("BytecodeMemberType", IntWidth::U8)
        .doc("Represents the type of a module member.");
    let string_ref = |name: &str| {
        Member::data(name, "BytecodeMemberID").doc("References a string constant.")
    };

    UnionSchema::new("BytecodeMember", tag)
        .doc("Represents a member of a compiled module.")
        .variants([
            Variant::structure("Integer", [Member::data("value", "i64")])
                .doc("Represents an integer constant."),
            Variant::structure("Float", [Member::data("value", "f64")])
                .doc("Represents a floating point constant."),
            Variant::structure("String", [Member::data("value", "InternedString")])
                .doc("Represents a string constant."),
            Variant::structure("Symbol", [string_ref("name")]).doc("Represents a symbol constant."),
            Variant::structure("Import", [string_ref("module_name")]).doc("Represents an import."),
            Variant::structure(
                "Variable",
                [
                    string_ref("name"),
                    Member::data("initial_value", "BytecodeMemberID")
                        .doc("References a constant. Can be invalid (meaning: initially null)."),
                ],
            )
            .doc("Represents a variable."),
            Variant::structure(
                "Function",
                [Member::data("id", "BytecodeFunctionID").doc("References the compiled function.")],
            )
            .doc("Represents a function."),
        ])
        .format(FormatMode::Define)
        .hash(HashMode::Define)
        .equality(EqualityMode::Define)
}
