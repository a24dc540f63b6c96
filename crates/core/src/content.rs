//! Fixed text tables for students and staff.

pub const STUDENT_COMPLAINTS: &[&str] = &[
    "Why did I get a B+? I deserve an A!",
    "The exam had stuff we never covered!",
    "Can I get an extension? My dog ate my laptop.",
    "Is this going to be on the test?",
    "You never answer my emails!",
    "The group project partner did nothing!",
    "Can you round my 59.4 up to a 60?",
    "I was sick during the midterm, can I retake it?",
    "Why is attendance mandatory?",
    "The lecture slides are not uploaded yet!",
];

pub const STAFF_SAYINGS: &[&str] = &[
    "Coffee machine is broken again.",
    "Need anything? I take payment in ego.",
    "Quiet in here. For now.",
    "Grading season is the worst season.",
    "Have you tried turning the projector off and on?",
];

pub fn complaint(index: usize) -> &'static str {
    STUDENT_COMPLAINTS[index % STUDENT_COMPLAINTS.len()]
}

pub fn saying(index: usize) -> &'static str {
    STAFF_SAYINGS[index % STAFF_SAYINGS.len()]
}
